use std::collections::HashSet;

/// The chat participant who sent a message, reduced to exactly what the
/// permission check needs.
#[derive(Clone, Debug)]
pub struct Caller {
    pub name: String,
    pub moderator: bool,
    pub broadcaster: bool,
}

impl Caller {
    pub fn new(name: &str, moderator: bool, broadcaster: bool) -> Self {
        Self {
            name: name.to_lowercase(),
            moderator,
            broadcaster,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Everyone,
    Moderator,
    Admin,
}

impl Tier {
    pub const ORDERED: [Self; 3] = [Self::Admin, Self::Moderator, Self::Everyone];

    pub const fn noun(self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

/// The static allow-list behind the Admin tier.
///
/// Admin is pure list membership. Moderator is the role flag, the broadcaster
/// badge, or being an admin -- by rule, not by set containment.
#[derive(Default, Clone, Debug)]
pub struct AdminList {
    names: HashSet<String>,
}

impl AdminList {
    pub fn from_csv(input: &str) -> Self {
        Self {
            names: input
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn classify(&self, caller: &Caller) -> Tier {
        if self.contains(&caller.name) {
            return Tier::Admin;
        }
        if caller.moderator || caller.broadcaster {
            return Tier::Moderator;
        }
        Tier::Everyone
    }
}
