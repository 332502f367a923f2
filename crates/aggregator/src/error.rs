// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: arguments the aggregator cannot honor, or I/O failures
/// that imply data corruption. Malformed individual lines, unparseable
/// filenames, and unreadable files are logged and skipped instead —
/// they never reach this type.
#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("log directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir { path: PathBuf, #[source] source: io::Error },

    #[error("invalid date constraint {0:?}: expected MM-DD-YYYY")]
    BadDateConstraint(String),

    #[error("line in {path} exceeds the 4096-byte buffer")]
    LineTooLong { path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),
}
