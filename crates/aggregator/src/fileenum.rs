// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory scan and time-ordering of log files, grounded on
//! `ltc.c::compile_logs`/`add_to_file_list`: only regular files ending
//! in `_1.log` carry events; each survivor's name is parsed for its
//! embedded creation timestamp and the whole set is sorted oldest-first.
//! Unlike the original's `die()` on an unparseable name, spec.md §7
//! downgrades this to a logged warning and a skip.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::timeparse::parse_filename_timestamp;

const LOG_SUFFIX: &str = "_1.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub created_at: i64,
}

/// Enumerate `dir` for regular files whose names end in `_1.log`,
/// returning them sorted ascending by the creation timestamp encoded in
/// the name. Files that can't be stat'd, aren't regular files, or whose
/// name doesn't parse are skipped with a warning rather than aborting
/// the run.
pub fn scan_dir(dir: &Path) -> std::io::Result<Vec<LogFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.ends_with(LOG_SUFFIX) {
            continue;
        }

        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                warn!("error stating '{}': {}", name, e);
                continue;
            }
        };
        if !file_type.is_file() {
            continue;
        }

        let Some(created_at) = parse_filename_timestamp(&name) else {
            warn!("skipping unparseable log filename: {}", name);
            continue;
        };

        files.push(LogFile { path: entry.path(), created_at });
    }

    files.sort_by_key(|f| f.created_at);
    Ok(files)
}

#[cfg(test)]
#[path = "fileenum_tests.rs"]
mod tests;
