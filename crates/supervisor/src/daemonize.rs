// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup and shutdown sequencing: already-running check, log sink
//! setup, and detaching from the controlling terminal.

use std::fs::OpenOptions;
use std::path::Path;

use daemonize::Daemonize;
use tracing::info;

use crate::error::SupervisorError;

/// Fail fast if another instance's control socket is already present.
/// This is the same check the original performed with `stat()` before
/// binding: the socket path's mere existence on disk is the liveness
/// signal, since nothing else unlinks it.
pub fn check_not_running(sock_path: &Path) -> Result<(), SupervisorError> {
    if sock_path.exists() {
        return Err(SupervisorError::AlreadyRunning(sock_path.to_path_buf()));
    }
    Ok(())
}

/// Open the log sink file, truncating any previous contents.
pub fn open_log_sink(log_path: &Path) -> Result<std::fs::File, SupervisorError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .map_err(|source| SupervisorError::LogSink { path: log_path.to_path_buf(), source })
}

/// Detach from the controlling terminal. Does not change the working
/// directory and does not close inherited descriptors, matching
/// `daemon(1, 1)` in the original startup path. Per spec §4.5, stdout and
/// stderr are redirected onto `log_sink` and stdin onto the null device;
/// `daemonize`'s own default for any stream not explicitly pointed
/// elsewhere is `/dev/null`, which covers stdin here.
pub fn daemonize(log_sink: &std::fs::File) -> Result<(), SupervisorError> {
    let cwd = std::env::current_dir()?;
    let stdout = log_sink.try_clone()?;
    let stderr = log_sink.try_clone()?;
    Daemonize::new()
        .working_directory(cwd)
        .pid_file(common::join(&std::env::temp_dir(), "ts_manager.pid"))
        .stdout(stdout)
        .stderr(stderr)
        .start()?;
    info!("daemonized");
    Ok(())
}

#[cfg(test)]
#[path = "daemonize_tests.rs"]
mod tests;
