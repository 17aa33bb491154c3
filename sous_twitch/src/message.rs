use std::sync::Arc;

use sous_core::message::MessageType;

use super::{Privmsg, Tags};

#[derive(Debug)]
pub struct Message {
    sender: Arc<str>,
    target: Arc<str>,
    data: Arc<str>,
    tags: Arc<Tags>,
    own: bool,
}

impl Message {
    /// `login` is the bot's own account, for echo suppression.
    pub fn from_pm(pm: Privmsg, login: &str) -> Self {
        Self {
            own: pm.user.eq_ignore_ascii_case(login),
            sender: pm.user,
            target: pm.target,
            data: pm.data,
            tags: Arc::new(pm.tags),
        }
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    fn badge_iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.tags
            .get("badges")
            .into_iter()
            .flat_map(|s| s.split(','))
            .flat_map(|s| s.split_once('/'))
    }
}

impl MessageType for Message {
    fn data(&self) -> &str {
        &self.data
    }

    fn sender_name(&self) -> &str {
        &self.sender
    }

    fn channel(&self) -> &str {
        &self.target
    }

    fn is_self(&self) -> bool {
        self.own
    }

    fn is_from_moderator(&self) -> bool {
        self.tags.get("mod") == Some("1")
            || self
                .badge_iter()
                .any(|(key, val)| key == "moderator" && val == "1")
    }

    fn is_from_broadcaster(&self) -> bool {
        self.badge_iter()
            .any(|(key, val)| key == "broadcaster" && val == "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm(user: &str, badges: Option<&str>, mod_tag: Option<&str>) -> Privmsg {
        let mut tags = Tags::default();
        if let Some(badges) = badges {
            tags.insert("badges", badges);
        }
        if let Some(mod_tag) = mod_tag {
            tags.insert("mod", mod_tag);
        }
        Privmsg {
            tags,
            user: Arc::from(user),
            target: Arc::from("#kitchen"),
            data: Arc::from("!dice"),
        }
    }

    #[test]
    fn role_flags_come_from_tags() {
        let msg = Message::from_pm(pm("mia", Some("moderator/1,subscriber/12"), None), "sous");
        assert!(msg.is_from_moderator());
        assert!(!msg.is_from_broadcaster());

        let msg = Message::from_pm(pm("mia", None, Some("1")), "sous");
        assert!(msg.is_from_moderator());

        let msg = Message::from_pm(pm("cass", Some("broadcaster/1"), Some("0")), "sous");
        assert!(msg.is_from_broadcaster());
        assert!(!msg.is_from_moderator());

        let msg = Message::from_pm(pm("alice", None, None), "sous");
        assert!(!msg.is_from_moderator());
        assert!(!msg.is_from_broadcaster());
    }

    #[test]
    fn own_messages_are_flagged() {
        assert!(Message::from_pm(pm("Sous", None, None), "sous").is_self());
        assert!(!Message::from_pm(pm("alice", None, None), "sous").is_self());
    }
}
