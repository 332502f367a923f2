// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Teamspeak supervisor (`ts-supervisor`)
//!
//! Daemonizes, launches the bot and/or web-server modules, watches them
//! for death, restarts them under a bounded failure count, relays their
//! stdout/stderr into a log file, and serves a local command socket
//! with persistent framed sessions.
//!
//! Architecture:
//! - Listener task: accepts connections, spawns a session task per client
//! - Module watcher tasks: one per running module, reaping on exit
//! - Main task: owns startup/shutdown sequencing and the signal select loop

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod config;
mod context;
mod daemonize;
mod error;
mod logsink;
mod module;
mod protocol;
mod session;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::UnixListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::config::Config;
use crate::context::SupervisorContext;
use crate::error::SupervisorError;
use crate::logsink::LogSink;
use crate::module::ModuleTable;

/// Manage and supervise the Teamspeak bot and web server.
#[derive(Parser, Debug)]
#[command(name = "ts-supervisor", about = "Manage and supervise the Teamspeak bot and web server")]
struct Cli {
    /// Start with both the bot and the web server.
    #[arg(short = 'a')]
    all: bool,

    /// Start with only the bot.
    #[arg(short = 'b')]
    bot: bool,

    /// Start with only the web server.
    #[arg(short = 'w')]
    web: bool,

    /// Attach as an interactive client to an already-running supervisor.
    #[arg(short = 'i', conflicts_with_all = ["all", "bot", "web"])]
    interactive: bool,

    /// Send the remaining arguments as a single command to an already-running
    /// supervisor (capitalized and lowercase forms are equivalent).
    #[arg(short = 's', short_alias = 'S', num_args = 1.., conflicts_with_all = ["all", "bot", "web", "interactive"], allow_hyphen_values = true)]
    send: Option<Vec<String>>,
}

/// Plain, non-async `main`: the daemonizing path must fork *before* a
/// Tokio runtime or the tracing-appender worker thread exists, since only
/// the calling thread survives `fork()` — a `#[tokio::main]` runtime
/// would already have its epoll/eventfd instance open by then, which
/// Tokio does not support carrying across a fork. So daemonizing happens
/// here, synchronously, and only the client modes (`-i`/`-s`/`-S`), which
/// never fork, build a runtime up front.
fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let cfg = Config::load();

    if !cli.all && !cli.bot && !cli.web && !cli.interactive && cli.send.is_none() {
        eprintln!("Usage: ts-supervisor [-s CMD... | -S CMD... | -i | [-a] [-b] [-w]]");
        return std::process::ExitCode::FAILURE;
    }

    if cli.interactive {
        return block_on_current_thread(async {
            common::init_stderr();
            match client::start_interactive(&cfg.sock_path).await {
                Ok(()) => std::process::ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::ExitCode::FAILURE
                }
            }
        });
    }

    if let Some(args) = cli.send {
        if let Err(msg) = client::validate_send_args(&args) {
            common::init_stderr();
            eprintln!("{msg}");
            return std::process::ExitCode::FAILURE;
        }
        return block_on_current_thread(async move {
            common::init_stderr();
            match client::send_once(&cfg.sock_path, &args).await {
                Ok(()) => std::process::ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::ExitCode::FAILURE
                }
            }
        });
    }

    match run_daemon_mode(cfg, cli.all || cli.bot, cli.all || cli.web) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

/// Build a fresh current-thread runtime and block on `fut`. Only used by
/// the non-daemonizing client modes, which can set up Tokio the ordinary
/// way since they never fork.
fn block_on_current_thread<F>(fut: F) -> std::process::ExitCode
where
    F: std::future::Future<Output = std::process::ExitCode>,
{
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt.block_on(fut),
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

/// Daemonize, then build the Tokio runtime and drive the event loop.
/// Ordering matters here: `daemonize::daemonize` must run before the
/// tracing-appender worker thread is spawned (`common::init_file`) and
/// before any Tokio runtime is constructed, since `fork()` only carries
/// the calling thread into the child and Tokio's own I/O driver does not
/// support being forked underneath it. Everything after the fork —
/// logging, the runtime, the event loop — is set up fresh in the
/// (possibly daemonized) child.
fn run_daemon_mode(cfg: Config, start_bot: bool, start_web: bool) -> Result<(), SupervisorError> {
    daemonize::check_not_running(&cfg.sock_path)?;
    let log_file = daemonize::open_log_sink(&cfg.log_path)?;
    daemonize::daemonize(&log_file)?;

    let _log_guard = common::init_file(&cfg.log_path)?;
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    rt.block_on(run_daemon(cfg, log_file, start_bot, start_web))
}

async fn run_daemon(
    cfg: Config,
    log_file: std::fs::File,
    start_bot: bool,
    start_web: bool,
) -> Result<(), SupervisorError> {
    info!("supervisor starting");

    let sock_path = cfg.sock_path.clone();
    let listener = bind_listener(&sock_path)?;

    let sink = LogSink::new(log_file);
    let mut table = ModuleTable::new(&cfg);
    table.starting = true;
    let ctx = std::sync::Arc::new(SupervisorContext::new(table, sink));

    if start_bot {
        start_module(&ctx, "ts_bot");
    }
    if start_web {
        start_module(&ctx, "ts_webserver");
    }
    ctx.table.lock().starting = false;

    let mut sigterm = signal(SignalKind::terminate())?;

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _addr)) => {
                        let ctx = ctx.clone();
                        tokio::spawn(session::handle_connection(stream, ctx));
                    }
                    Err(e) => error!("accept error: {}", e),
                }
            }
            _ = ctx.shutdown.notified() => {
                info!("stop command received, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                ctx.request_stop();
                break;
            }
        }
    }

    shutdown(&ctx, &sock_path);
    Ok(())
}

fn bind_listener(sock_path: &PathBuf) -> Result<UnixListener, SupervisorError> {
    UnixListener::bind(sock_path)
        .map_err(|source| SupervisorError::Bind { path: sock_path.clone(), source })
}

fn start_module(ctx: &std::sync::Arc<SupervisorContext>, name: &'static str) {
    let mut guard = ctx.table.lock();
    let Some(m) = guard.get_mut(name) else { return };
    if let Some(child) = module::start(m) {
        drop(guard);
        module::launch(ctx.table.clone(), ctx.sink.clone(), name, child);
    }
}

fn shutdown(ctx: &std::sync::Arc<SupervisorContext>, sock_path: &PathBuf) {
    let mut guard = ctx.table.lock();
    for m in guard.iter_mut() {
        module::exit(m);
    }
    drop(guard);
    if let Err(e) = std::fs::remove_file(sock_path) {
        error!("failed to remove control socket: {}", e);
    }
    info!("supervisor shutdown complete");
}
