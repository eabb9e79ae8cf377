//! Error types
//!
//! Defines domain-specific error types for each layer of the FTP client.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use crate::protocol::Reply;

/// Errors raised while reading a reply from the control connection
#[derive(Debug)]
pub enum ReplyError {
    /// The stream closed before any reply line arrived
    ConnectionClosed,
    /// The first line does not start with a three-digit status code
    Malformed(String),
    Io(io::Error),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::ConnectionClosed => write!(f, "Connection closed by server"),
            ReplyError::Malformed(line) => write!(f, "Malformed reply: {:?}", line),
            ReplyError::Io(e) => write!(f, "Failed to read reply: {}", e),
        }
    }
}

impl std::error::Error for ReplyError {}

impl From<io::Error> for ReplyError {
    fn from(error: io::Error) -> Self {
        ReplyError::Io(error)
    }
}

/// Transfer module errors
#[derive(Debug)]
pub enum TransferError {
    InvalidPassiveReply(String),
    DataConnectFailed(SocketAddr, io::Error),
    ReadFailed(io::Error),
    WriteFailed(io::Error),
    /// The data socket accepted zero bytes of a pending chunk
    WriteZero { sent: u64 },
    SinkFailed(io::Error),
    SourceFailed(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::InvalidPassiveReply(text) => {
                write!(f, "Invalid PASV reply: {}", text)
            }
            TransferError::DataConnectFailed(addr, e) => {
                write!(f, "Failed to open data connection to {}: {}", addr, e)
            }
            TransferError::ReadFailed(e) => write!(f, "Data connection read failed: {}", e),
            TransferError::WriteFailed(e) => write!(f, "Data connection write failed: {}", e),
            TransferError::WriteZero { sent } => {
                write!(f, "Data connection stopped accepting bytes after {} bytes", sent)
            }
            TransferError::SinkFailed(e) => write!(f, "Failed to write local data: {}", e),
            TransferError::SourceFailed(e) => write!(f, "Failed to read local data: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

/// General FTP client error that encompasses all error types
#[derive(Debug)]
pub enum FtpClientError {
    Resolve(String, io::Error),
    ConnectFailed(String, io::Error),
    NoGreeting,
    NotConnected,
    NotLoggedIn,
    InvalidArgument(String),
    Reply(ReplyError),
    UnexpectedReply {
        command: &'static str,
        expected: &'static [u16],
        reply: Reply,
    },
    Transfer(TransferError),
    Local(String, io::Error),
    Io(io::Error),
}

impl FtpClientError {
    pub fn unexpected(command: &'static str, expected: &'static [u16], reply: Reply) -> Self {
        FtpClientError::UnexpectedReply {
            command,
            expected,
            reply,
        }
    }

    /// Status code of the offending reply, if the failure came from one
    pub fn reply_code(&self) -> Option<u16> {
        match self {
            FtpClientError::UnexpectedReply { reply, .. } => Some(reply.code()),
            _ => None,
        }
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Resolve(host, e) => write!(f, "Could not resolve {}: {}", host, e),
            FtpClientError::ConnectFailed(addr, e) => {
                write!(f, "Could not connect to {}: {}", addr, e)
            }
            FtpClientError::NoGreeting => write!(f, "Server did not send a greeting"),
            FtpClientError::NotConnected => write!(f, "No control connection"),
            FtpClientError::NotLoggedIn => write!(f, "Not logged in"),
            FtpClientError::InvalidArgument(arg) => write!(f, "Invalid command argument: {:?}", arg),
            FtpClientError::Reply(e) => write!(f, "Reply error: {}", e),
            FtpClientError::UnexpectedReply {
                command,
                expected,
                reply,
            } => {
                let codes: Vec<String> = expected.iter().map(u16::to_string).collect();
                write!(
                    f,
                    "{} expected {}, got: {}",
                    command,
                    codes.join("/"),
                    reply.first_line()
                )
            }
            FtpClientError::Transfer(e) => write!(f, "Transfer error: {}", e),
            FtpClientError::Local(path, e) => write!(f, "Local file {}: {}", path, e),
            FtpClientError::Io(e) => write!(f, "Control connection I/O error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {}

impl From<ReplyError> for FtpClientError {
    fn from(error: ReplyError) -> Self {
        FtpClientError::Reply(error)
    }
}

impl From<TransferError> for FtpClientError {
    fn from(error: TransferError) -> Self {
        FtpClientError::Transfer(error)
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::Io(error)
    }
}
