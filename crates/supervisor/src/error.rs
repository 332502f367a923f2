// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup/shutdown failures. Anything that reaches `main` as an
/// `Err` here is printed to stderr and the process exits non-zero;
/// everything else (a malformed frame, an unknown module name, a module
/// that fails to fork) is handled inline and logged.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("another supervisor is already running at {0}")]
    AlreadyRunning(PathBuf),

    #[error("failed to open log sink {path}: {source}")]
    LogSink { path: PathBuf, #[source] source: io::Error },

    #[error("failed to daemonize: {0}")]
    Daemonize(#[from] daemonize::Error),

    #[error("failed to bind control socket {path}: {source}")]
    Bind { path: PathBuf, #[source] source: io::Error },

    #[error("manager is not currently running")]
    NotRunning,

    #[error(transparent)]
    Logging(#[from] common::logging::LoggingError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
