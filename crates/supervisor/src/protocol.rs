// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire framing and command grammar for the control socket.
//!
//! Framing: a 4-byte big-endian length prefix, then exactly that many
//! bytes of ASCII payload, no trailing newline or NUL. `CLOSE_SENTINEL`
//! in place of a length means "close without expecting a reply".

use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_CMD_LEN: usize = 4096;
pub const MAX_PAYLOAD_LEN: usize = MAX_CMD_LEN - 4;
pub const CLOSE_SENTINEL: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stop,
    Restart(Vec<String>),
    Disable(Vec<String>),
    Enable(Vec<String>),
    Unknown,
}

/// Parse a command payload the way `manager_process_input` does: first
/// whitespace-delimited token is the verb, the rest are module names.
pub fn parse(input: &str) -> Command {
    let mut tokens = input.split_whitespace();
    let verb = match tokens.next() {
        Some(v) => v,
        None => return Command::Unknown,
    };
    let args: Vec<String> = tokens.map(str::to_string).collect();

    match verb {
        "stop" => Command::Stop,
        "restart" => Command::Restart(args),
        "disable" => Command::Disable(args),
        "enable" => Command::Enable(args),
        _ => Command::Unknown,
    }
}

/// Reply text for a command that takes a module-name list but was sent
/// with none.
pub const NO_ARGUMENT_REPLY: &str = "No argument given.";
pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command.";
pub const STOPPING_REPLY: &str = "Shutting down...";
pub const OK_REPLY: &str = "OK";
pub const FAIL_REPLY: &str = "FAIL";

/// Read one framed length-prefixed request from `reader`.
///
/// Returns `Ok(None)` on a clean session close: EOF, the close sentinel,
/// or a length outside `1..=MAX_PAYLOAD_LEN`. Returns `Ok(Some(_))` with
/// the decoded ASCII payload on a complete, well-formed frame.
pub async fn read_frame<R>(reader: &mut R) -> tokio::io::Result<Option<String>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(()) => {}
        Err(e) if e.kind() == tokio::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let len = u32::from_be_bytes(len_buf);
    if len == CLOSE_SENTINEL || len as usize > MAX_PAYLOAD_LEN {
        return Ok(None);
    }

    let mut payload = vec![0u8; len as usize];
    match reader.read_exact(&mut payload).await {
        Ok(()) => {}
        Err(e) if e.kind() == tokio::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    Ok(Some(String::from_utf8_lossy(&payload).into_owned()))
}

/// Write a raw (unframed) reply, as the supervisor does for session
/// responses.
pub async fn write_reply<W>(writer: &mut W, reply: &str) -> tokio::io::Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    writer.write_all(reply.as_bytes()).await
}

/// Frame a request the way the CLI client does: 4-byte big-endian length
/// prefix then payload, or the close sentinel for `quit`.
pub fn encode_request(payload: &str) -> Vec<u8> {
    if payload == "quit" {
        let mut out = Vec::with_capacity(4);
        out.extend_from_slice(&CLOSE_SENTINEL.to_be_bytes());
        return out;
    }
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload.as_bytes());
    out
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
