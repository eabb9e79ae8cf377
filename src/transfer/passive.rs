//! Passive mode endpoint parsing
//!
//! Decodes the `(h1,h2,h3,h4,p1,p2)` group of a `227` reply into the
//! address the client connects its data socket to.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::error::TransferError;

/// Address announced by the server for one data connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataEndpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl DataEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }
}

impl fmt::Display for DataEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Parses the data endpoint out of a PASV reply line.
pub fn parse_pasv_reply(text: &str) -> Result<DataEndpoint, TransferError> {
    let invalid = || TransferError::InvalidPassiveReply(text.to_string());

    let start = text.find('(').ok_or_else(invalid)?;
    let end = start + text[start..].find(')').ok_or_else(invalid)?;
    let inside = &text[start + 1..end];

    let numbers = inside
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| invalid())?;

    let &[h1, h2, h3, h4, p1, p2] = numbers.as_slice() else {
        return Err(invalid());
    };

    Ok(DataEndpoint {
        ip: Ipv4Addr::new(h1, h2, h3, h4),
        port: u16::from(p1) * 256 + u16::from(p2),
    })
}
