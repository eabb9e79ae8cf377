//! FTP Protocol implementation
//!
//! Handles command encoding, reply reading, and status codes.

pub mod commands;
pub mod reply;
pub mod responses;

pub use commands::Command;
pub use reply::{Reply, read_reply};
