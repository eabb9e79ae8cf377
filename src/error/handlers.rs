//! Error handlers
//!
//! Maps client errors onto their failure category and renders them for the shell.

use crate::error::types::{FtpClientError, ReplyError, TransferError};
use log::error;

/// Broad failure category an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connection,
    Protocol,
    MalformedData,
    LocalResource,
    Transfer,
}

/// Log an FTP client error and return the detail line shown to the user
pub fn report_error(context: &str, err: &FtpClientError) -> String {
    error!("{} ({:?}): {}", context, error_category(err), err);
    err.to_string()
}

/// Classify an error into its failure category
pub fn error_category(err: &FtpClientError) -> ErrorCategory {
    match err {
        FtpClientError::Resolve(..) | FtpClientError::ConnectFailed(..) => {
            ErrorCategory::Connection
        }
        FtpClientError::NoGreeting
        | FtpClientError::NotConnected
        | FtpClientError::NotLoggedIn
        | FtpClientError::InvalidArgument(_)
        | FtpClientError::UnexpectedReply { .. } => ErrorCategory::Protocol,
        FtpClientError::Reply(ReplyError::ConnectionClosed) => ErrorCategory::Protocol,
        FtpClientError::Reply(ReplyError::Malformed(_)) => ErrorCategory::MalformedData,
        FtpClientError::Reply(ReplyError::Io(_)) | FtpClientError::Io(_) => {
            ErrorCategory::Transfer
        }
        FtpClientError::Transfer(TransferError::InvalidPassiveReply(_)) => {
            ErrorCategory::MalformedData
        }
        FtpClientError::Transfer(TransferError::DataConnectFailed(..)) => {
            ErrorCategory::Connection
        }
        FtpClientError::Transfer(TransferError::SinkFailed(_))
        | FtpClientError::Transfer(TransferError::SourceFailed(_))
        | FtpClientError::Local(..) => ErrorCategory::LocalResource,
        FtpClientError::Transfer(_) => ErrorCategory::Transfer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Reply;
    use std::io;

    #[test]
    fn test_categories() {
        let reply = Reply::from_lines(vec!["530 Login incorrect".to_string()]).unwrap();
        assert_eq!(
            error_category(&FtpClientError::unexpected("PASS", &[230], reply)),
            ErrorCategory::Protocol
        );
        assert_eq!(
            error_category(&FtpClientError::Transfer(TransferError::InvalidPassiveReply(
                "227 nope".into()
            ))),
            ErrorCategory::MalformedData
        );
        assert_eq!(
            error_category(&FtpClientError::Local(
                "missing.bin".into(),
                io::Error::from(io::ErrorKind::NotFound)
            )),
            ErrorCategory::LocalResource
        );
        assert_eq!(
            error_category(&FtpClientError::ConnectFailed(
                "127.0.0.1:21".into(),
                io::Error::from(io::ErrorKind::ConnectionRefused)
            )),
            ErrorCategory::Connection
        );
    }

    #[test]
    fn test_report_error_renders_reply() {
        let reply = Reply::from_lines(vec!["550 No such file".to_string()]).unwrap();
        let err = FtpClientError::unexpected("RETR", &[150, 125], reply);
        assert_eq!(
            report_error("Download failed", &err),
            "RETR expected 150/125, got: 550 No such file"
        );
    }
}
