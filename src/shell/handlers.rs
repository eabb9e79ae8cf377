//! Shell command handlers
//!
//! Maps each shell command name to a handler. Every handler validates its
//! arguments and then calls exactly one `FtpSession` operation.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, Write};

use crate::client::FtpSession;
use crate::config::ClientConfig;
use crate::error::FtpClientError;
use crate::error::handlers::report_error;
use crate::shell::ShellInput;
use crate::transfer::TransferType;

/// Whether the shell keeps reading commands
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything a handler may touch
pub struct ShellContext<'a> {
    pub session: &'a mut FtpSession,
    pub config: &'a ClientConfig,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

pub type Handler = fn(&mut ShellContext<'_>, &ShellInput) -> io::Result<Flow>;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub handler: Handler,
}

pub const HANDLERS: &[CommandSpec] = &[
    CommandSpec {
        name: "connect",
        usage: "connect <host> [port]",
        summary: "Connect to FTP server",
        handler: handle_connect,
    },
    CommandSpec {
        name: "login",
        usage: "login <user> <pass>",
        summary: "Login with username and password",
        handler: handle_login,
    },
    CommandSpec {
        name: "ls",
        usage: "ls",
        summary: "List files",
        handler: handle_list,
    },
    CommandSpec {
        name: "get",
        usage: "get <remote> [local]",
        summary: "Download file",
        handler: handle_get,
    },
    CommandSpec {
        name: "put",
        usage: "put <local> [remote]",
        summary: "Upload file",
        handler: handle_put,
    },
    CommandSpec {
        name: "type",
        usage: "type [a|i]",
        summary: "Set transfer type (ASCII or binary)",
        handler: handle_type,
    },
    CommandSpec {
        name: "quit",
        usage: "quit",
        summary: "Quit the application",
        handler: handle_quit,
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "Show this help",
        handler: handle_help,
    },
];

pub fn find_handler(name: &str) -> Option<&'static CommandSpec> {
    HANDLERS.iter().find(|spec| spec.name == name)
}

/// Runs the handler registered for `input.verb`.
pub fn dispatch(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    match find_handler(&input.verb) {
        Some(spec) => {
            info!("Shell command: {}", spec.name);
            (spec.handler)(ctx, input)
        }
        None => {
            writeln!(ctx.err, "Unknown command: {}", input.verb)?;
            Ok(Flow::Continue)
        }
    }
}

fn usage(ctx: &mut ShellContext<'_>, name: &str) -> io::Result<Flow> {
    if let Some(spec) = find_handler(name) {
        writeln!(ctx.err, "Usage: {}", spec.usage)?;
    }
    Ok(Flow::Continue)
}

fn failure(ctx: &mut ShellContext<'_>, headline: &str, err: &FtpClientError) -> io::Result<Flow> {
    let detail = report_error(headline, err);
    writeln!(ctx.err, "{}", headline)?;
    writeln!(ctx.err, "  {}", detail)?;
    Ok(Flow::Continue)
}

fn handle_connect(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    let Some(host) = input.arg1.as_deref() else {
        return usage(ctx, "connect");
    };
    let port = match input.arg2.as_deref() {
        None => ctx.config.default_port,
        Some(text) => match text.parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => return usage(ctx, "connect"),
        },
    };

    match ctx.session.connect(host, port) {
        Ok(_) => {
            writeln!(ctx.out, "Connected to {}", host)?;
            Ok(Flow::Continue)
        }
        Err(e) => failure(ctx, "Failed to connect.", &e),
    }
}

fn handle_login(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    let (Some(user), Some(pass)) = (input.arg1.as_deref(), input.arg2.as_deref()) else {
        return usage(ctx, "login");
    };

    match ctx.session.login(user, pass) {
        Ok(()) => {
            writeln!(ctx.out, "Logged in as {}", user)?;
            Ok(Flow::Continue)
        }
        Err(e) => failure(ctx, "Login failed.", &e),
    }
}

fn handle_list(ctx: &mut ShellContext<'_>, _input: &ShellInput) -> io::Result<Flow> {
    match ctx.session.list(&mut *ctx.out) {
        Ok(_) => Ok(Flow::Continue),
        Err(e) => failure(ctx, "Failed to list files.", &e),
    }
}

fn handle_get(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    let Some(remote) = input.arg1.as_deref() else {
        return usage(ctx, "get");
    };
    let local = input.arg2.as_deref().unwrap_or(remote);

    let mut file = DeferredFile::new(local);
    let result = ctx
        .session
        .download(remote, &mut file)
        .and_then(|_| file.finish().map_err(|e| FtpClientError::Local(local.into(), e)));

    match result {
        Ok(()) => {
            writeln!(ctx.out, "Downloaded {} to {}", remote, local)?;
            Ok(Flow::Continue)
        }
        Err(e) => failure(ctx, "Download failed.", &e),
    }
}

/// Local download target that is only created once data arrives.
///
/// A download rejected before the first byte leaves any existing file at
/// `path` untouched. Partial downloads are kept.
struct DeferredFile<'a> {
    path: &'a str,
    file: Option<File>,
}

impl<'a> DeferredFile<'a> {
    fn new(path: &'a str) -> Self {
        Self { path, file: None }
    }

    fn open(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                debug!("Creating local file {}", self.path);
                File::create(self.path)?
            }
        };
        Ok(self.file.insert(file))
    }

    /// Makes sure the file exists, so an empty remote file yields an empty local one.
    fn finish(&mut self) -> io::Result<()> {
        self.open()?.flush()
    }
}

impl Write for DeferredFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn handle_put(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    let Some(local) = input.arg1.as_deref() else {
        return usage(ctx, "put");
    };
    let remote = input.arg2.as_deref().unwrap_or(local);

    let mut file = match File::open(local) {
        Ok(file) => file,
        Err(e) => {
            return failure(ctx, "Upload failed.", &FtpClientError::Local(local.into(), e));
        }
    };

    match ctx.session.upload(&mut file, remote) {
        Ok(_) => {
            writeln!(ctx.out, "Uploaded {} as {}", local, remote)?;
            Ok(Flow::Continue)
        }
        Err(e) => failure(ctx, "Upload failed.", &e),
    }
}

fn handle_type(ctx: &mut ShellContext<'_>, input: &ShellInput) -> io::Result<Flow> {
    let Some(arg) = input.arg1.as_deref() else {
        writeln!(ctx.out, "Usage: type [a|i]")?;
        return Ok(Flow::Continue);
    };
    let transfer_type = TransferType::from_user_input(arg);

    match ctx.session.set_type(transfer_type) {
        Ok(()) => {
            writeln!(ctx.out, "Type set to {}", transfer_type.label())?;
            Ok(Flow::Continue)
        }
        Err(e) => failure(ctx, "Failed to set type.", &e),
    }
}

fn handle_quit(ctx: &mut ShellContext<'_>, _input: &ShellInput) -> io::Result<Flow> {
    if let Err(e) = ctx.session.logout() {
        warn!("Logout on quit failed: {}", e);
    }
    writeln!(ctx.out, "Goodbye.")?;
    Ok(Flow::Exit)
}

fn handle_help(ctx: &mut ShellContext<'_>, _input: &ShellInput) -> io::Result<Flow> {
    writeln!(ctx.out, "Available commands:")?;
    for spec in HANDLERS {
        writeln!(ctx.out, " {:<23} - {}", spec.usage, spec.summary)?;
    }
    Ok(Flow::Continue)
}
