use super::Tags;

/// Splits a raw IRC line into (tags, prefix-nick, command, args, trailing).
///
/// Lines the server is allowed to send that don't fit the shape come back as
/// `None`; the read loop skips them instead of dying.
pub fn parse(mut line: &str) -> Option<(Tags, Option<&str>, &str, Vec<&str>, Option<&str>)> {
    let line = &mut line;
    *line = line.trim_end_matches(['\r', '\n']);

    let tags = if line.starts_with('@') {
        Tags::parse(line)
    } else {
        None
    }
    .unwrap_or_default();

    let prefix = if line.starts_with(':') {
        // ':nick!user@host cmd ..' -> 'nick'; a prefix with nothing after it
        // is malformed
        let (head, tail) = line.split_once(' ')?;
        *line = tail;
        head[1..].split_terminator('!').next()
    } else {
        None
    };

    let command = command(line)?;
    let args = args(line);
    let data = data(line);

    Some((tags, prefix, command, args, data))
}

fn command<'a>(input: &mut &'a str) -> Option<&'a str> {
    match input.split_once(' ') {
        Some((head, tail)) => {
            *input = tail;
            Some(head)
        }
        None => {
            let head = std::mem::take(input);
            Some(head).filter(|s| !s.is_empty())
        }
    }
}

fn args<'a>(input: &mut &'a str) -> Vec<&'a str> {
    match input.split_once(':') {
        Some((head, tail)) => {
            *input = tail;
            head.split_ascii_whitespace().collect()
        }
        None => {
            let head = std::mem::take(input);
            head.split_ascii_whitespace().collect()
        }
    }
}

fn data<'a>(input: &mut &'a str) -> Option<&'a str> {
    Some(input.trim_end()).filter(|s| !s.is_empty())
}
