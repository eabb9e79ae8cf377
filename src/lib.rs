//! RAX FTP Client
//!
//! A minimal FTP client: one control connection, passive-mode data
//! connections, and LIST/RETR/STOR over them.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod shell;
pub mod transfer;
pub mod utils;

pub use client::{FtpSession, SessionState};
pub use config::ClientConfig;
pub use error::FtpClientError;
pub use protocol::Reply;
pub use transfer::{DataEndpoint, TransferType};
