// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-socket client modes: `-i` (interactive session) and `-s`/`-S`
//! (send one command line as argv and print the reply), grounded on
//! `client.c::start_interactive`/`try_send`/`sanitize_command`.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::error::SupervisorError;
use crate::protocol::{self, MAX_PAYLOAD_LEN};

const PROMPT: &str = "[supervisor]$ ";
const QUIT_KEYWORD: &str = "quit";

async fn connect(sock_path: &Path) -> Result<UnixStream, SupervisorError> {
    if !sock_path.exists() {
        return Err(SupervisorError::NotRunning);
    }
    UnixStream::connect(sock_path).await.map_err(SupervisorError::from)
}

/// Validate a one-shot `-s`/`-S` command the way `sanitize_command`
/// does: `stop` takes no extra arguments, `enable`/`disable`/`restart`
/// each take exactly one.
pub fn validate_send_args(args: &[String]) -> Result<(), String> {
    let Some(verb) = args.first() else {
        return Err("no command given".to_string());
    };
    let extra = args.len() - 1;
    match verb.as_str() {
        "stop" if extra == 0 => Ok(()),
        "enable" | "disable" | "restart" if extra == 1 => Ok(()),
        "stop" => Err("stop takes no arguments".to_string()),
        "enable" | "disable" | "restart" => Err(format!("{verb} takes exactly one argument")),
        other => Err(format!("unrecognized command: {other}")),
    }
}

/// Send a single command built from command-line argv and print the
/// reply, then disconnect.
pub async fn send_once(sock_path: &Path, args: &[String]) -> Result<(), SupervisorError> {
    let payload = args.join(" ");
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(SupervisorError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "command too long",
        )));
    }

    let mut stream = connect(sock_path).await?;
    stream.write_all(&protocol::encode_request(&payload)).await?;

    let mut buf = vec![0u8; MAX_PAYLOAD_LEN];
    let n = tokio::io::AsyncReadExt::read(&mut stream, &mut buf).await?;
    if n > 0 {
        println!("{}", String::from_utf8_lossy(&buf[..n]));
    }
    Ok(())
}

/// Run an interactive session: prompt, read a line from stdin, send it,
/// print the reply, repeat until the user types `quit`.
pub async fn start_interactive(sock_path: &Path) -> Result<(), SupervisorError> {
    let mut stream = connect(sock_path).await?;
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        print!("{PROMPT}");
        std::io::stdout().flush().ok();

        line.clear();
        let bytes_read = stdin.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }
        let trimmed = line.trim_end_matches('\n');
        if trimmed.chars().all(|c| !c.is_alphanumeric()) {
            continue;
        }

        stream.write_all(&protocol::encode_request(trimmed)).await?;
        if trimmed == QUIT_KEYWORD {
            break;
        }

        let mut buf = vec![0u8; MAX_PAYLOAD_LEN];
        let n = tokio::io::AsyncReadExt::read(&mut stream, &mut buf).await?;
        if n > 0 {
            println!("{}", String::from_utf8_lossy(&buf[..n]));
        } else {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
