//! Client session management
//!
//! Owns the control connection, session state, and the protocol
//! sequences behind every user-facing operation.

pub mod control;
pub mod session;
pub mod state;

pub use session::FtpSession;
pub use state::SessionState;
