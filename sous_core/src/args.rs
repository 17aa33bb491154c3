use std::str::FromStr;

/// Positional arguments: everything after the command token, split on
/// whitespace.
#[derive(Default, Debug, Clone)]
pub struct Arguments {
    list: Vec<String>,
}

impl Arguments {
    /// Splits off the command token and keeps the rest.
    pub fn parse(data: &str) -> Self {
        Self {
            list: data
                .split_ascii_whitespace()
                .skip(1)
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.list.get(index).map(|s| &**s)
    }

    /// `None` covers both a missing argument and one that doesn't parse, so
    /// call sites can fall back to their default in a single step.
    pub fn get_parsed<T>(&self, index: usize) -> Option<T>
    where
        T: FromStr,
    {
        self.get(index).and_then(|s| s.parse().ok())
    }

    pub fn join(&self) -> String {
        self.list.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|s| &**s)
    }
}
