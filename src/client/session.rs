//! Client session management
//!
//! `FtpSession` owns the control connection and drives every protocol
//! exchange: greeting, login, `TYPE`, passive-mode negotiation and the
//! LIST/RETR/STOR handshakes over short-lived data connections.

use log::{debug, info, warn};
use std::io::{Read, Write};
use std::net::TcpStream;

use crate::client::SessionState;
use crate::client::control::{ControlChannel, expect_reply};
use crate::config::ClientConfig;
use crate::error::{FtpClientError, ReplyError, TransferError};
use crate::protocol::responses::{
    CLOSING, DATA_OPENING, LOGIN_SUCCESS, OK, PASSIVE_MODE, PASSWORD_REQUIRED, READY,
    TRANSFER_COMPLETE,
};
use crate::protocol::{Command, Reply};
use crate::transfer::{
    DataEndpoint, TransferType, close_data_stream, open_data_stream, parse_pasv_reply,
    receive_to_sink, send_from_source,
};
use crate::utils::network::connect_to_host;
use crate::utils::validation::is_valid_argument;

const DEFAULT_BUFFER_SIZE: usize = 4096;

/// One FTP session against one server.
///
/// Operations run strictly one at a time; each blocks until the server
/// has answered. Data connections never outlive the call that opened them.
pub struct FtpSession {
    control: Option<ControlChannel>,
    logged_in: bool,
    transfer_type: TransferType,
    remote: Option<(String, u16)>,
    buffer_size: usize,
}

impl Default for FtpSession {
    fn default() -> Self {
        Self {
            control: None,
            logged_in: false,
            transfer_type: TransferType::Image,
            remote: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FtpSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        let mut session = Self::default();
        session.transfer_type = config.default_transfer_type;
        session.buffer_size = config.buffer_size.max(1);
        session
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn state(&self) -> SessionState {
        match (&self.control, self.logged_in) {
            (None, _) => SessionState::Disconnected,
            (Some(_), false) => SessionState::Connected,
            (Some(_), true) => SessionState::Authenticated,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Transfer type re-applied before every download and upload
    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    /// Host and port of the last successful `connect`
    pub fn remote(&self) -> Option<(&str, u16)> {
        self.remote.as_ref().map(|(host, port)| (host.as_str(), *port))
    }

    // --------------------
    // Control operations
    // --------------------

    /// Opens the control connection and waits for the `220` greeting.
    ///
    /// An existing control connection is closed first.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<Reply, FtpClientError> {
        if let Some(previous) = self.control.take() {
            info!("Replacing control connection to {:?}", previous.peer());
            previous.close();
        }
        self.logged_in = false;
        self.remote = None;

        let stream = connect_to_host(host, port)?;
        let mut control = ControlChannel::new(stream);

        let greeting = match control.read_reply() {
            Ok(reply) => expect_reply("connect", reply, &[READY]),
            Err(FtpClientError::Reply(ReplyError::ConnectionClosed)) => {
                Err(FtpClientError::NoGreeting)
            }
            Err(e) => Err(e),
        };
        let greeting = match greeting {
            Ok(reply) => reply,
            Err(e) => {
                warn!("No proper greeting from {}:{}: {}", host, port, e);
                control.close();
                return Err(e);
            }
        };

        info!("Connected to {}:{}: {}", host, port, greeting.first_line());
        self.control = Some(control);
        self.remote = Some((host.to_string(), port));
        Ok(greeting)
    }

    /// Authenticates with `USER`, and with `PASS` when the server asks for it.
    pub fn login(&mut self, user: &str, password: &str) -> Result<(), FtpClientError> {
        let result = self.login_inner(user, password);
        self.track(result)
    }

    fn login_inner(&mut self, user: &str, password: &str) -> Result<(), FtpClientError> {
        let user = checked_argument(user)?;
        if !password.is_empty() && !is_valid_argument(password) {
            return Err(FtpClientError::InvalidArgument("<password>".into()));
        }

        self.logged_in = false;
        let control = self.control_mut()?;

        let reply = control.execute_expect(
            &Command::User(user.clone()),
            &[LOGIN_SUCCESS, PASSWORD_REQUIRED],
        )?;
        if reply.code() == PASSWORD_REQUIRED {
            control.execute_expect(&Command::Pass(password.to_string()), &[LOGIN_SUCCESS])?;
        } else {
            debug!("Server accepted {} without a password", user);
        }

        self.logged_in = true;
        info!("Logged in as {}", user);
        Ok(())
    }

    /// Sends `QUIT` and closes the control connection on `221`.
    ///
    /// Without a control connection this is a no-op. Any other reply
    /// leaves the connection open.
    pub fn logout(&mut self) -> Result<(), FtpClientError> {
        let Some(control) = self.control.as_mut() else {
            return Ok(());
        };

        let result = control.execute_expect(&Command::Quit, &[CLOSING]).map(|_| ());
        if result.is_ok() {
            if let Some(control) = self.control.take() {
                control.close();
            }
            self.logged_in = false;
            info!("Logged out");
        }
        self.track(result)
    }

    /// Sends `TYPE` and records the new transfer type on `200`.
    pub fn set_type(&mut self, transfer_type: TransferType) -> Result<(), FtpClientError> {
        let result = self
            .control_mut()
            .and_then(|control| control.execute_expect(&Command::Type(transfer_type), &[OK]));
        if result.is_ok() {
            self.transfer_type = transfer_type;
            debug!("Transfer type set to {}", transfer_type);
        }
        self.track(result).map(|_| ())
    }

    /// Sends `PASV` and decodes the data endpoint from the `227` reply.
    pub fn enter_passive_mode(&mut self) -> Result<DataEndpoint, FtpClientError> {
        let result = self.enter_passive_mode_inner();
        self.track(result)
    }

    fn enter_passive_mode_inner(&mut self) -> Result<DataEndpoint, FtpClientError> {
        let control = self.control_mut()?;
        let reply = control.execute_expect(&Command::Pasv, &[PASSIVE_MODE])?;
        let endpoint = parse_pasv_reply(reply.first_line()).inspect_err(|e| {
            warn!("{}", e);
        })?;
        debug!("Server announced data endpoint {}", endpoint);
        Ok(endpoint)
    }

    // --------------------
    // Transfer operations
    // --------------------

    /// Lists the current remote directory into `sink`.
    ///
    /// Returns the number of listing bytes received.
    pub fn list<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64, FtpClientError> {
        let result = self.list_inner(sink);
        self.track(result)
    }

    fn list_inner<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64, FtpClientError> {
        self.ensure_logged_in()?;
        let buffer_size = self.buffer_size;
        self.run_transfer(Command::List, |data| {
            receive_to_sink(data, sink, buffer_size)
        })
    }

    /// Retrieves `remote_name` into `sink`.
    ///
    /// Bytes already written to the sink are left in place on failure.
    pub fn download<W: Write + ?Sized>(
        &mut self,
        remote_name: &str,
        sink: &mut W,
    ) -> Result<u64, FtpClientError> {
        let result = self.download_inner(remote_name, sink);
        self.track(result)
    }

    fn download_inner<W: Write + ?Sized>(
        &mut self,
        remote_name: &str,
        sink: &mut W,
    ) -> Result<u64, FtpClientError> {
        self.ensure_logged_in()?;
        let remote_name = checked_argument(remote_name)?;
        self.set_type(self.transfer_type)?;

        let buffer_size = self.buffer_size;
        let bytes = self.run_transfer(Command::Retr(remote_name.clone()), |data| {
            receive_to_sink(data, sink, buffer_size)
        })?;
        info!("Downloaded {} ({} bytes)", remote_name, bytes);
        Ok(bytes)
    }

    /// Stores everything read from `source` as `remote_name`.
    pub fn upload<R: Read + ?Sized>(
        &mut self,
        source: &mut R,
        remote_name: &str,
    ) -> Result<u64, FtpClientError> {
        let result = self.upload_inner(source, remote_name);
        self.track(result)
    }

    fn upload_inner<R: Read + ?Sized>(
        &mut self,
        source: &mut R,
        remote_name: &str,
    ) -> Result<u64, FtpClientError> {
        self.ensure_logged_in()?;
        let remote_name = checked_argument(remote_name)?;
        self.set_type(self.transfer_type)?;

        let buffer_size = self.buffer_size;
        let bytes = self.run_transfer(Command::Stor(remote_name.clone()), |data| {
            send_from_source(source, data, buffer_size)
        })?;
        info!("Uploaded {} ({} bytes)", remote_name, bytes);
        Ok(bytes)
    }

    /// Runs one data-connection exchange for `command`.
    ///
    /// PASV, connect the data socket, send the command, require a 150/125
    /// opening reply, pump bytes, close the data socket, then require 226.
    /// The data socket is closed on every path before this returns.
    fn run_transfer<F>(&mut self, command: Command, pump: F) -> Result<u64, FtpClientError>
    where
        F: FnOnce(&mut TcpStream) -> Result<u64, TransferError>,
    {
        let endpoint = self.enter_passive_mode_inner()?;
        let mut data_stream = open_data_stream(&endpoint)?;

        let control = match self.control_mut() {
            Ok(control) => control,
            Err(e) => {
                close_data_stream(data_stream);
                return Err(e);
            }
        };

        let verb = command.verb();
        if let Err(e) = control.execute_expect(&command, DATA_OPENING) {
            close_data_stream(data_stream);
            return Err(e);
        }

        let pumped = pump(&mut data_stream);
        close_data_stream(data_stream);

        let completion = control
            .read_reply()
            .and_then(|reply| expect_reply(verb, reply, &[TRANSFER_COMPLETE]));

        match (pumped, completion) {
            (Ok(bytes), Ok(_)) => Ok(bytes),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), completion) => {
                match completion {
                    Ok(reply) => warn!("{} data failed but server reported: {}", verb, reply.first_line()),
                    Err(FtpClientError::Reply(ReplyError::ConnectionClosed)) => {
                        self.drop_control();
                    }
                    Err(reply_err) => debug!("{} completion after data failure: {}", verb, reply_err),
                }
                Err(e.into())
            }
        }
    }

    // --------------------
    // Helpers
    // --------------------

    fn control_mut(&mut self) -> Result<&mut ControlChannel, FtpClientError> {
        self.control.as_mut().ok_or(FtpClientError::NotConnected)
    }

    fn ensure_logged_in(&self) -> Result<(), FtpClientError> {
        let state = self.state();
        if !state.has_control() {
            return Err(FtpClientError::NotConnected);
        }
        if !state.can_transfer() {
            return Err(FtpClientError::NotLoggedIn);
        }
        Ok(())
    }

    /// Drops the control connection once the server has closed it.
    fn track<T>(&mut self, result: Result<T, FtpClientError>) -> Result<T, FtpClientError> {
        if let Err(FtpClientError::Reply(ReplyError::ConnectionClosed)) = &result {
            self.drop_control();
        }
        result
    }

    fn drop_control(&mut self) {
        if let Some(control) = self.control.take() {
            warn!("Server {:?} closed the control connection", control.peer());
            control.close();
        }
        self.logged_in = false;
    }
}

impl Drop for FtpSession {
    fn drop(&mut self) {
        if let Some(mut control) = self.control.take() {
            debug!("Session dropped with open control connection, sending QUIT");
            if let Err(e) = control.execute_expect(&Command::Quit, &[CLOSING]) {
                debug!("QUIT during teardown failed: {}", e);
            }
            control.close();
        }
    }
}

fn checked_argument(arg: &str) -> Result<String, FtpClientError> {
    if is_valid_argument(arg) {
        Ok(arg.to_string())
    } else {
        Err(FtpClientError::InvalidArgument(arg.to_string()))
    }
}
