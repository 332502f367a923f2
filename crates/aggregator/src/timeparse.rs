// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar-to-epoch conversion, grounded on `ltc.c::process_data`'s
//! `strptime`+`mktime` pair. Resolves the open question on the
//! hard-coded five-hour offset the original's fast path applied: no
//! offset is introduced here. Every timestamp — log-line and
//! log-filename alike — is parsed as naive UTC and compared only
//! against other timestamps parsed the same way, so no zone conversion
//! is ever needed.

use chrono::{NaiveDate, NaiveDateTime};

pub const LOG_TIMESTAMP_LEN: usize = 19;

/// Parse the leading 19 bytes of a log line, `YYYY-MM-DD HH:MM:SS`, into
/// seconds since the epoch. Returns `None` if the prefix is missing or
/// malformed.
pub fn parse_log_timestamp(line: &str) -> Option<i64> {
    let prefix = line.get(..LOG_TIMESTAMP_LEN)?;
    let dt = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%d %H:%M:%S").ok()?;
    Some(dt.and_utc().timestamp())
}

const FILENAME_PREFIX: &str = "ts3server_";
const FILENAME_STAMP_LEN: usize = "YYYY-MM-DD__HH_MM_SS".len();

/// Parse the `ts3server_YYYY-MM-DD__HH_MM_SS` creation-time stamp
/// embedded in a log file's name, ignoring whatever the filename trails
/// off with (`_1.log`, a disambiguating counter, etc.).
pub fn parse_filename_timestamp(file_name: &str) -> Option<i64> {
    let rest = file_name.strip_prefix(FILENAME_PREFIX)?;
    let stamp = rest.get(..FILENAME_STAMP_LEN)?;
    let dt = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d__%H_%M_%S").ok()?;
    Some(dt.and_utc().timestamp())
}

/// Parse the `-d MM-DD-YYYY` date-floor flag into a midnight-UTC epoch
/// second.
pub fn parse_date_floor(input: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(input, "%m-%d-%Y").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

#[cfg(test)]
#[path = "timeparse_tests.rs"]
mod tests;
