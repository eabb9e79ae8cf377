//! In-process FTP server used by the integration tests.
//!
//! Serves USER/PASS/TYPE/PASV/LIST/RETR/STOR/QUIT from an in-memory file
//! map and records every command line it receives.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

pub const USER: &str = "demo";
pub const PASSWORD: &str = "secret";

pub type Files = Arc<Mutex<BTreeMap<String, Vec<u8>>>>;

pub struct FakeServer {
    pub port: u16,
    pub files: Files,
    pub commands: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    pub async fn start(initial: &[(&str, &[u8])]) -> Self {
        let files: Files = Arc::new(Mutex::new(
            initial
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_vec()))
                .collect(),
        ));
        let commands = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept_files = Arc::clone(&files);
        let accept_commands = Arc::clone(&commands);
        tokio::spawn(async move {
            loop {
                let Ok((stream, addr)) = listener.accept().await else {
                    break;
                };
                let files = Arc::clone(&accept_files);
                let commands = Arc::clone(&accept_commands);
                tokio::spawn(async move {
                    let _ = handle_session(stream, addr, files, commands).await;
                });
            }
        });

        Self {
            port,
            files,
            commands,
        }
    }

    pub async fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(name).cloned()
    }

    pub async fn commands(&self) -> Vec<String> {
        self.commands.lock().await.clone()
    }
}

async fn handle_session(
    stream: TcpStream,
    _addr: SocketAddr,
    files: Files,
    commands: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    let mut user_ok = false;
    let mut logged_in = false;
    let mut data_listener: Option<TcpListener> = None;

    write_half
        .write_all(b"220-Welcome to the test server\r\n220 Ready\r\n")
        .await?;

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let trimmed = line.trim_end_matches("\r\n").to_string();
        commands.lock().await.push(trimmed.clone());

        let (verb, arg) = match trimmed.split_once(' ') {
            Some((verb, arg)) => (verb.to_string(), arg.to_string()),
            None => (trimmed.clone(), String::new()),
        };

        let needs_login = matches!(verb.as_str(), "LIST" | "RETR" | "STOR");
        if needs_login && !logged_in {
            data_listener = None;
            write_half.write_all(b"530 Not logged in\r\n").await?;
            continue;
        }

        match verb.as_str() {
            "USER" if arg == "anonymous" => {
                logged_in = true;
                write_half.write_all(b"230 Anonymous access granted\r\n").await?;
            }
            "USER" => {
                user_ok = arg == USER;
                logged_in = false;
                write_half.write_all(b"331 Password required\r\n").await?;
            }
            "PASS" if user_ok && arg == PASSWORD => {
                logged_in = true;
                write_half.write_all(b"230 Login successful\r\n").await?;
            }
            "PASS" => {
                write_half.write_all(b"530 Login incorrect\r\n").await?;
            }
            "TYPE" if arg == "A" || arg == "I" => {
                write_half
                    .write_all(format!("200 Switching to {} mode\r\n", arg).as_bytes())
                    .await?;
            }
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0").await?;
                let port = listener.local_addr()?.port();
                data_listener = Some(listener);
                let reply = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{}).\r\n",
                    port / 256,
                    port % 256
                );
                write_half.write_all(reply.as_bytes()).await?;
            }
            "LIST" => {
                let Some(listener) = data_listener.take() else {
                    write_half.write_all(b"425 Use PASV first\r\n").await?;
                    continue;
                };
                write_half
                    .write_all(b"150 Here comes the directory listing\r\n")
                    .await?;
                let (mut data, _) = listener.accept().await?;
                let listing: String = files
                    .lock()
                    .await
                    .iter()
                    .map(|(name, body)| format!("-rw-r--r-- 1 ftp ftp {} {}\r\n", body.len(), name))
                    .collect();
                data.write_all(listing.as_bytes()).await?;
                data.shutdown().await?;
                drop(data);
                write_half.write_all(b"226 Directory send OK\r\n").await?;
            }
            "RETR" => {
                let Some(listener) = data_listener.take() else {
                    write_half.write_all(b"425 Use PASV first\r\n").await?;
                    continue;
                };
                let body = files.lock().await.get(&arg).cloned();
                let Some(body) = body else {
                    write_half.write_all(b"550 Failed to open file\r\n").await?;
                    continue;
                };
                write_half
                    .write_all(b"150 Opening BINARY mode data connection\r\n")
                    .await?;
                let (mut data, _) = listener.accept().await?;
                data.write_all(&body).await?;
                data.shutdown().await?;
                drop(data);
                write_half.write_all(b"226 Transfer complete\r\n").await?;
            }
            "STOR" => {
                let Some(listener) = data_listener.take() else {
                    write_half.write_all(b"425 Use PASV first\r\n").await?;
                    continue;
                };
                write_half.write_all(b"150 Ok to send data\r\n").await?;
                let (mut data, _) = listener.accept().await?;
                let mut body = Vec::new();
                data.read_to_end(&mut body).await?;
                files.lock().await.insert(arg, body);
                write_half.write_all(b"226 Transfer complete\r\n").await?;
            }
            "QUIT" => {
                write_half.write_all(b"221 Goodbye\r\n").await?;
                return Ok(());
            }
            _ => {
                write_half
                    .write_all(b"502 Command not implemented\r\n")
                    .await?;
            }
        }
    }
}
