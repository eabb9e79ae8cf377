//! Network utilities
//!
//! Name resolution and connection establishment for the control connection.

use log::{debug, info, warn};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use crate::error::FtpClientError;

/// Resolves `host` and returns every candidate address in resolver order.
pub fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, FtpClientError> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| FtpClientError::Resolve(host.to_string(), e))?
        .collect();

    if addrs.is_empty() {
        return Err(FtpClientError::Resolve(
            host.to_string(),
            io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
        ));
    }
    debug!("Resolved {} to {:?}", host, addrs);
    Ok(addrs)
}

/// Connects to the first candidate address of `host` that accepts.
pub fn connect_to_host(host: &str, port: u16) -> Result<TcpStream, FtpClientError> {
    let mut last_error = None;

    for addr in resolve(host, port)? {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                info!("Connected to {} ({})", host, addr);
                return Ok(stream);
            }
            Err(e) => {
                warn!("Connection to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(FtpClientError::ConnectFailed(
        format!("{}:{}", host, port),
        last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::ConnectionRefused)),
    ))
}
