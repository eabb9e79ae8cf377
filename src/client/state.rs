//! Module `state`
//!
//! Lifecycle states of an FTP session.

use std::fmt;

/// Where a session stands in the `Disconnected → Connected → Authenticated` lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    /// Greeting received, no successful login yet
    Connected,
    Authenticated,
}

impl SessionState {
    /// Whether `TYPE` and `PASV` may be issued
    pub fn has_control(&self) -> bool {
        !matches!(self, SessionState::Disconnected)
    }

    /// Whether LIST, RETR and STOR may be issued
    pub fn can_transfer(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connected => "connected",
            SessionState::Authenticated => "authenticated",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_permissions() {
        assert!(!SessionState::Disconnected.has_control());
        assert!(SessionState::Connected.has_control());
        assert!(!SessionState::Connected.can_transfer());
        assert!(SessionState::Authenticated.can_transfer());
        assert_eq!(SessionState::Authenticated.to_string(), "authenticated");
    }
}
