// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The file-order driver: `ltc.c::begin_parsing`/`parse_file` rewritten
//! over [`crate::fileenum::LogFile`] and [`crate::client::ClientTable`].
//! Each file is one server lifetime (spec.md §4.7 "File boundaries"): it
//! is read line by line, each line is handed to [`crate::line::parse_line`]
//! and any resulting event applied to the table, and then the table's
//! transient per-client state is reset before the next file starts.

use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::client::ClientTable;
use crate::error::AggregatorError;
use crate::fileenum::LogFile;
use crate::line::parse_line;

/// `ltc.c`'s `MAX_LINE_SIZE`: a line (including its trailing newline)
/// that doesn't fit this buffer is fatal, matching spec.md §4.8/§7.
const MAX_LINE_LEN: usize = 4096;

/// Run the full batch: every file in time order, each contributing to a
/// single running [`ClientTable`], reset at every file boundary.
pub fn run(files: &[LogFile], floor: Option<i64>) -> Result<ClientTable, AggregatorError> {
    let mut table = ClientTable::new();
    for file in files {
        process_file(&file.path, floor, &mut table)?;
        table.reset_file_boundary();
    }
    Ok(table)
}

/// Process one file. An unreadable file is a warning and a skip (it
/// never contributed anything, same as `begin_parsing`'s `fopen`
/// failure); an overlong line is fatal, since it implies the buffer-sized
/// read lost data the original's `fgets` would have split across two
/// misparsed reads.
fn process_file(path: &Path, floor: Option<i64>, table: &mut ClientTable) -> Result<(), AggregatorError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("error opening '{}': {}", path.display(), e);
            return Ok(());
        }
    };

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        if line.len() > MAX_LINE_LEN {
            return Err(AggregatorError::LineTooLong { path: path.to_path_buf() });
        }

        if let Some(event) = parse_line(&line, floor) {
            table.apply(&event);
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
