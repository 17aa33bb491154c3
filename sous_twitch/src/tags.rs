use std::collections::HashMap;

use anyhow::Context as _;

/// IRCv3 message tags (`@key=value;key=value `).
#[derive(Default, Debug, Clone)]
pub struct Tags {
    pub(crate) map: HashMap<Box<str>, Box<str>>,
}

impl Tags {
    /// Consumes the tag section from the front of `input`, if there is one.
    pub fn parse(input: &mut &str) -> Option<Self> {
        let rest = input.strip_prefix('@')?;
        let (head, tail) = rest.split_once(' ')?;
        *input = tail;

        let map = head
            .split(';')
            .filter_map(|part| part.split_once('='))
            .map(|(k, v)| (Box::from(k), unescape(v).into_boxed_str()))
            .collect();
        Some(Self { map })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| &**s)
    }

    pub fn get_parsed<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: Into<anyhow::Error>,
    {
        let val = self
            .get(key)
            .with_context(|| anyhow::anyhow!("missing tag '{key}'"))?;
        val.parse().map_err(Into::into)
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, key: &str, val: &str) {
        self.map.insert(Box::from(key), Box::from(val));
    }
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_only_the_tag_section() {
        let mut input = "@badges=broadcaster/1,subscriber/0;mod=0 :user!user@host PRIVMSG #chan :hi";
        let tags = Tags::parse(&mut input).unwrap();

        assert_eq!(input, ":user!user@host PRIVMSG #chan :hi");
        assert_eq!(tags.get("badges"), Some("broadcaster/1,subscriber/0"));
        assert_eq!(tags.get("mod"), Some("0"));
        assert_eq!(tags.get("missing"), None);
    }

    #[test]
    fn no_tags_leaves_input_alone() {
        let mut input = ":user!user@host PRIVMSG #chan :hi";
        assert!(Tags::parse(&mut input).is_none());
        assert_eq!(input, ":user!user@host PRIVMSG #chan :hi");
    }

    #[test]
    fn values_are_unescaped() {
        let mut input = r"@display-name=Some\sChef;note=a\:b tail";
        let tags = Tags::parse(&mut input).unwrap();
        assert_eq!(tags.get("display-name"), Some("Some Chef"));
        assert_eq!(tags.get("note"), Some("a;b"));
    }

    #[test]
    fn parsed_lookup() {
        let mut input = "@user-id=1234 tail";
        let tags = Tags::parse(&mut input).unwrap();
        assert_eq!(tags.get_parsed::<u64>("user-id").unwrap(), 1234);
        assert!(tags.get_parsed::<u64>("absent").is_err());
    }
}
