//! Interactive shell
//!
//! Reads commands line by line and drives one `FtpSession` with them.

pub mod handlers;
pub mod parser;

pub use handlers::{Flow, ShellContext, dispatch};
pub use parser::{ShellInput, parse_line};

use log::info;
use std::io::{self, BufRead, Write};

use crate::client::FtpSession;
use crate::config::ClientConfig;

/// Runs the shell until `quit` or end of input.
///
/// Normal output goes to `out`; failures and usage hints go to `err`.
pub fn run<R, W, E>(config: &ClientConfig, mut input: R, mut out: W, mut err: E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut session = FtpSession::with_config(config);
    writeln!(out, "Welcome to the FTP client.")?;
    writeln!(out, "Type 'help' for available commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("End of input, leaving shell");
            break;
        }
        let Some(command) = parse_line(&line) else {
            continue;
        };

        let mut ctx = ShellContext {
            session: &mut session,
            config,
            out: &mut out,
            err: &mut err,
        };
        if dispatch(&mut ctx, &command)? == Flow::Exit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_run_until_quit() {
        let config = ClientConfig::default();
        let input = Cursor::new("help\n\nbogus\nquit\nhelp\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        run(&config, input, &mut out, &mut err).unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(out.starts_with("Welcome to the FTP client.\n"));
        assert_eq!(out.matches("Available commands:").count(), 1);
        assert!(out.ends_with("Goodbye.\n"));
        assert_eq!(err, "Unknown command: bogus\n");
    }

    #[test]
    fn test_run_stops_at_eof() {
        let config = ClientConfig::default();
        let mut out = Vec::new();
        run(&config, Cursor::new("type\n"), &mut out, io::sink()).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Usage: type [a|i]"));
        assert!(out.ends_with("ftp> "));
    }
}
