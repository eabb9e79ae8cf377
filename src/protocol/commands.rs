//! Module `commands`
//!
//! Defines the FTP commands the client sends on the control connection
//! and their wire encoding.

use std::fmt;

use crate::transfer::TransferType;

/// Represents an FTP command issued by the client.
///
/// Commands that carry an argument store it as a `String`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    User(String),
    Pass(String),
    Quit,
    Type(TransferType),
    Pasv,
    List,
    Retr(String),
    Stor(String),
}

impl Command {
    /// The command verb, as sent on the wire
    pub fn verb(&self) -> &'static str {
        match self {
            Command::User(_) => "USER",
            Command::Pass(_) => "PASS",
            Command::Quit => "QUIT",
            Command::Type(_) => "TYPE",
            Command::Pasv => "PASV",
            Command::List => "LIST",
            Command::Retr(_) => "RETR",
            Command::Stor(_) => "STOR",
        }
    }

    /// Encodes the command as a CRLF-terminated control line
    pub fn to_wire(&self) -> String {
        let arg = match self {
            Command::User(a) | Command::Pass(a) | Command::Retr(a) | Command::Stor(a) => {
                Some(a.as_str())
            }
            Command::Type(t) => Some(t.code()),
            Command::Quit | Command::Pasv | Command::List => None,
        };
        match arg {
            Some(arg) => format!("{} {}\r\n", self.verb(), arg),
            None => format!("{}\r\n", self.verb()),
        }
    }
}

/// Log-safe rendering; passwords are masked
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(_) => write!(f, "PASS ****"),
            other => write!(f, "{}", other.to_wire().trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_encoding() {
        assert_eq!(Command::User("demo".into()).to_wire(), "USER demo\r\n");
        assert_eq!(Command::Pasv.to_wire(), "PASV\r\n");
        assert_eq!(Command::Type(TransferType::Ascii).to_wire(), "TYPE A\r\n");
        assert_eq!(Command::Type(TransferType::Image).to_wire(), "TYPE I\r\n");
        assert_eq!(
            Command::Retr("my file.bin".into()).to_wire(),
            "RETR my file.bin\r\n"
        );
    }

    #[test]
    fn test_display_masks_password() {
        assert_eq!(Command::Pass("secret".into()).to_string(), "PASS ****");
        assert_eq!(Command::Stor("up.txt".into()).to_string(), "STOR up.txt");
    }
}
