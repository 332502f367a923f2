// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup shared by both binaries: a non-blocking file appender
//! feeding a `tracing-subscriber` registry with an `EnvFilter`
//! (`RUST_LOG`, default `info`).

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log path has no parent directory")]
    NoParentDir,

    #[error("failed to prepare log directory: {0}")]
    Io(#[from] io::Error),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a subscriber that writes to `log_path` (append mode, never
/// rotated out from under the supervisor's own stdout/stderr redirect).
/// Returns the guard that must be kept alive for the life of the process.
pub fn init_file(log_path: &Path) -> Result<WorkerGuard, LoggingError> {
    let parent = log_path.parent().ok_or(LoggingError::NoParentDir)?;
    std::fs::create_dir_all(parent)?;

    let file_name = log_path.file_name().ok_or(LoggingError::NoParentDir)?;
    let file_appender = tracing_appender::rolling::never(parent, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

/// Install a subscriber that writes to stderr, for the one-shot batch CLI.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
