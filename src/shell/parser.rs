//! Shell input parsing
//!
//! Splits a typed line into a command name and up to two arguments.

/// A tokenized shell line
#[derive(Debug, PartialEq)]
pub struct ShellInput {
    pub verb: String,
    pub arg1: Option<String>,
    /// Everything after the first argument, spaces included
    pub arg2: Option<String>,
}

/// Parse a raw input line; blank lines yield `None`.
pub fn parse_line(raw: &str) -> Option<ShellInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, ' ');
    let verb = parts.next().unwrap_or("").to_string();
    let rest = parts.next().unwrap_or("");

    let mut args = rest.splitn(2, ' ');
    let arg1 = args.next().filter(|a| !a.is_empty()).map(str::to_string);
    let arg2 = args.next().filter(|a| !a.is_empty()).map(str::to_string);

    Some(ShellInput { verb, arg1, arg2 })
}
