//! RAX FTP Client - Entry Point
//!
//! Interactive FTP client using passive-mode data connections.

use log::{error, info};
use std::io;
use std::process::ExitCode;

use rax_ftp_client::ClientConfig;
use rax_ftp_client::shell;
use rax_ftp_client::utils::logging::setup_logging;

fn main() -> ExitCode {
    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            setup_logging("warn");
            error!("Failed to load configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_logging(&config.log_level);
    info!("Launching FTP client...");

    let stdin = io::stdin();
    match shell::run(&config, stdin.lock(), io::stdout(), io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Shell terminated: {}", e);
            ExitCode::FAILURE
        }
    }
}
