// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-connection session handling: the framing loop from
//! `session.c::__process_session` plus command dispatch from
//! `manager.c::manager_process_input`, translated onto a Tokio task per
//! accepted connection instead of a poll-driven state machine. Command
//! dispatch remains strictly sequential per session: the task does not
//! read the next frame until the current command's reply has been
//! written.

use std::sync::Arc;

use tokio::net::UnixStream;
use tracing::{info, warn};

use crate::context::SupervisorContext;
use crate::module::{self, Module};
use crate::protocol::{self, Command};

/// Look up a module by name; unknown names are silently skipped, never
/// failing the verb.
fn with_module<F: FnOnce(&mut Module) -> bool>(ctx: &SupervisorContext, name: &str, f: F) -> bool {
    let mut guard = ctx.table.lock();
    match guard.get_mut(name) {
        Some(m) => f(m),
        None => true,
    }
}

/// Apply a parsed command against the shared context and produce the
/// reply text, exactly per the verb table in the framing spec.
pub fn dispatch(ctx: &Arc<SupervisorContext>, cmd: Command) -> &'static str {
    match cmd {
        Command::Stop => {
            ctx.request_stop();
            protocol::STOPPING_REPLY
        }
        Command::Unknown => protocol::UNKNOWN_COMMAND_REPLY,
        Command::Disable(names) => {
            if names.is_empty() {
                return protocol::NO_ARGUMENT_REPLY;
            }
            for name in &names {
                with_module(ctx, name, |m| {
                    module::exit(m);
                    true
                });
            }
            protocol::OK_REPLY
        }
        Command::Enable(names) => {
            if names.is_empty() {
                return protocol::NO_ARGUMENT_REPLY;
            }
            let mut all_ok = true;
            for name in &names {
                let ok = with_module(ctx, name, |m| module::start(m).is_some_and(|child| {
                    module::launch(ctx.table.clone(), ctx.sink.clone(), m.name, child);
                    true
                }));
                all_ok &= ok;
            }
            if all_ok {
                protocol::OK_REPLY
            } else {
                protocol::FAIL_REPLY
            }
        }
        Command::Restart(names) => {
            if names.is_empty() {
                return protocol::NO_ARGUMENT_REPLY;
            }
            let mut all_ok = true;
            for name in &names {
                let ok = with_module(ctx, name, |m| {
                    module::exit(m);
                    module::start(m).is_some_and(|child| {
                        module::launch(ctx.table.clone(), ctx.sink.clone(), m.name, child);
                        true
                    })
                });
                all_ok &= ok;
            }
            if all_ok {
                protocol::OK_REPLY
            } else {
                protocol::FAIL_REPLY
            }
        }
    }
}

/// Run the read-dispatch-reply loop for one accepted connection until
/// the client closes, sends the close sentinel, or sends a malformed
/// frame.
pub async fn handle_connection(mut stream: UnixStream, ctx: Arc<SupervisorContext>) {
    loop {
        let payload = match protocol::read_frame(&mut stream).await {
            Ok(Some(payload)) => payload,
            Ok(None) => break,
            Err(e) => {
                warn!("session read error: {}", e);
                break;
            }
        };

        let cmd = protocol::parse(&payload);
        let reply = dispatch(&ctx, cmd);

        if let Err(e) = protocol::write_reply(&mut stream, reply).await {
            warn!("session write error: {}", e);
            break;
        }
    }
    info!("session closed");
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
