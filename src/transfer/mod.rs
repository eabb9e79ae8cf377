//! Transfer module for the FTP client
//!
//! Handles passive-mode endpoints, data connections, and the byte pumps
//! that move file and listing data over them.

pub mod data_channel;
pub mod file_ops;
pub mod modes;
pub mod passive;

// Re-export key types and functions
pub use data_channel::{close_data_stream, open_data_stream};
pub use file_ops::{receive_to_sink, send_from_source};
pub use modes::TransferType;
pub use passive::{DataEndpoint, parse_pasv_reply};
