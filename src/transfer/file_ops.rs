//! Module `file_ops`
//!
//! Byte pumps between a data connection and the local sink or source.
//! The local side is any `Read`/`Write`; opening and closing it belongs to
//! the caller.

use log::{debug, error, info};
use std::io::{ErrorKind, Read, Write};

use crate::error::TransferError;

/// Copies everything the server sends on the data connection into `sink`.
///
/// Stops when the server closes the connection. Bytes already written to
/// the sink stay there if the copy fails part way.
pub fn receive_to_sink<D, W>(
    data_stream: &mut D,
    sink: &mut W,
    buffer_size: usize,
) -> Result<u64, TransferError>
where
    D: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total_bytes_received = 0u64;

    loop {
        let n = match data_stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("Read error on data connection after {total_bytes_received} bytes: {e}");
                return Err(TransferError::ReadFailed(e));
            }
        };

        if let Err(e) = sink.write_all(&buffer[..n]) {
            error!("Failed to write {n} bytes to local sink: {e}");
            return Err(TransferError::SinkFailed(e));
        }
        total_bytes_received += n as u64;
    }

    sink.flush().map_err(TransferError::SinkFailed)?;
    info!("Received {total_bytes_received} bytes over data connection");
    Ok(total_bytes_received)
}

/// Sends everything read from `source` over the data connection.
///
/// A short write is retried with the unsent tail until the chunk is gone;
/// a zero-length write or any error other than an interrupt aborts.
pub fn send_from_source<R, D>(
    source: &mut R,
    data_stream: &mut D,
    buffer_size: usize,
) -> Result<u64, TransferError>
where
    R: Read + ?Sized,
    D: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total_bytes_sent = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("Read error on local source after {total_bytes_sent} bytes: {e}");
                return Err(TransferError::SourceFailed(e));
            }
        };

        let mut written = 0;
        while written < n {
            match data_stream.write(&buffer[written..n]) {
                Ok(0) => {
                    error!("Data connection accepted no bytes after {total_bytes_sent} bytes");
                    return Err(TransferError::WriteZero {
                        sent: total_bytes_sent,
                    });
                }
                Ok(w) => {
                    if written + w < n {
                        debug!("Short write of {w} bytes, {} pending", n - written - w);
                    }
                    written += w;
                    total_bytes_sent += w as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("Write failure on data connection after {total_bytes_sent} bytes: {e}");
                    return Err(TransferError::WriteFailed(e));
                }
            }
        }
    }

    data_stream.flush().map_err(TransferError::WriteFailed)?;
    info!("Sent {total_bytes_sent} bytes over data connection");
    Ok(total_bytes_sent)
}
