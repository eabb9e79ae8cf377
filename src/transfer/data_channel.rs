//! Module `data_channel`
//!
//! Opens and closes the short-lived data connections used by LIST, RETR
//! and STOR. Each connection is opened to the endpoint announced by the
//! server's PASV reply and closed before the owning operation returns.

use log::{debug, info, warn};
use std::net::{Shutdown, TcpStream};

use crate::error::TransferError;
use crate::transfer::DataEndpoint;

/// Connects a data socket to the endpoint announced by the server.
pub fn open_data_stream(endpoint: &DataEndpoint) -> Result<TcpStream, TransferError> {
    let addr = endpoint.socket_addr();
    debug!("Opening data connection to {}", addr);

    let stream = TcpStream::connect(addr).map_err(|e| {
        warn!("Failed to connect data socket to {}: {}", addr, e);
        TransferError::DataConnectFailed(addr, e)
    })?;

    info!("Data connection established with {}", addr);
    Ok(stream)
}

/// Shuts down both directions of a data socket and drops it.
///
/// Shutting down the write half signals end-of-file to the server, which
/// is how an upload is completed.
pub fn close_data_stream(stream: TcpStream) {
    match stream.peer_addr() {
        Ok(peer) => debug!("Closing data connection to {}", peer),
        Err(_) => debug!("Closing data connection"),
    }
    // The peer may already have closed its side after sending everything.
    if let Err(e) = stream.shutdown(Shutdown::Both) {
        debug!("Data socket shutdown reported: {}", e);
    }
}
