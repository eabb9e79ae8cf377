//! FTP reply codes
//!
//! Status codes the client checks at each protocol checkpoint.

pub const ALREADY_OPEN: u16 = 125;
pub const ABOUT_TO_SEND: u16 = 150;
pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const CLOSING: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const PASSIVE_MODE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;

/// Either code announces that the server is opening the data connection
pub const DATA_OPENING: &[u16] = &[ABOUT_TO_SEND, ALREADY_OPEN];
