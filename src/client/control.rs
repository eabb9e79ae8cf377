//! Module `control`
//!
//! The long-lived control connection: sends one command line at a time
//! and reads the matching reply.

use log::{debug, warn};
use std::io::{BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use crate::error::FtpClientError;
use crate::protocol::{Command, Reply, read_reply};

pub struct ControlChannel {
    reader: BufReader<TcpStream>,
    peer: Option<SocketAddr>,
}

impl ControlChannel {
    pub fn new(stream: TcpStream) -> Self {
        let peer = stream.peer_addr().ok();
        Self {
            reader: BufReader::new(stream),
            peer,
        }
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Writes one CRLF-terminated command line.
    pub fn send(&mut self, command: &Command) -> Result<(), FtpClientError> {
        debug!("Sending: {}", command);
        let stream = self.reader.get_mut();
        stream.write_all(command.to_wire().as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    pub fn read_reply(&mut self) -> Result<Reply, FtpClientError> {
        Ok(read_reply(&mut self.reader)?)
    }

    /// Sends `command` and reads its reply.
    pub fn execute(&mut self, command: &Command) -> Result<Reply, FtpClientError> {
        self.send(command)?;
        self.read_reply()
    }

    /// Sends `command` and fails unless the reply code is one of `expected`.
    pub fn execute_expect(
        &mut self,
        command: &Command,
        expected: &'static [u16],
    ) -> Result<Reply, FtpClientError> {
        let reply = self.execute(command)?;
        expect_reply(command.verb(), reply, expected)
    }

    pub fn close(self) {
        debug!("Closing control connection to {:?}", self.peer);
        let _ = self.reader.get_ref().shutdown(Shutdown::Both);
    }
}

/// Passes `reply` through when its code is one of `expected`.
pub fn expect_reply(
    verb: &'static str,
    reply: Reply,
    expected: &'static [u16],
) -> Result<Reply, FtpClientError> {
    if reply.is_one_of(expected) {
        Ok(reply)
    } else {
        warn!("{} rejected: {}", verb, reply.first_line());
        Err(FtpClientError::unexpected(verb, expected, reply))
    }
}
