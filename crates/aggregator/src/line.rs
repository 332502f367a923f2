// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One log line in, an optional event out. Timestamp parsing per
//! [`crate::timeparse`], then a search for the connect/disconnect
//! substring and the `'<NAME>'(id:<DIGITS>)` layout after it, extraction
//! logic grounded on `ltc.c::sanitize_line`/`get_name` (apostrophe to
//! `'(` name bounds, high-bit-clear-only bytes) generalized to the
//! fuller grammar this format actually needs (a numeric id, not just a
//! name).

use tracing::warn;

use crate::timeparse::parse_log_timestamp;

const CONNECTED: &str = "client connected";
const DISCONNECTED: &str = "client disconnected";

/// A service account id that represents the server talking to itself;
/// dropped without comment.
const SERVICE_ACCOUNT_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Connect,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: i64,
    pub id: i64,
    pub name: String,
    pub kind: Kind,
}

/// Parse one line, dropping it (returning `None`) at any stage that
/// doesn't fit: no valid leading timestamp, earlier than `floor`, no
/// connect/disconnect substring, malformed `'<NAME>'(id:<N>)` tail, a
/// non-positive id, or the reserved service-account id.
pub fn parse_line(line: &str, floor: Option<i64>) -> Option<Event> {
    let timestamp = parse_log_timestamp(line)?;
    if let Some(floor) = floor {
        if timestamp < floor {
            return None;
        }
    }

    let (kind, after_action) = if let Some(rest) = line.find(CONNECTED).map(|i| &line[i + CONNECTED.len()..]) {
        (Kind::Connect, rest)
    } else if let Some(rest) = line.find(DISCONNECTED).map(|i| &line[i + DISCONNECTED.len()..]) {
        (Kind::Disconnect, rest)
    } else {
        return None;
    };

    let (name, id) = extract_name_and_id(after_action)?;

    if id <= 0 {
        warn!("dropping event with non-positive id {} ({})", id, name);
        return None;
    }
    if id == SERVICE_ACCOUNT_ID {
        return None;
    }

    Some(Event { timestamp, id, name, kind })
}

/// Extract `NAME` and `DIGITS` from `'<NAME>'(id:<DIGITS>)...`. `NAME`
/// runs from the first apostrophe to the first `'(` thereafter, keeping
/// only bytes with the high bit clear (stripping non-ASCII). `DIGITS`
/// is a signed decimal terminated by `)`.
fn extract_name_and_id(rest: &str) -> Option<(String, i64)> {
    let quote_start = rest.find('\'')?;
    let after_quote = &rest[quote_start + 1..];
    let name_end = after_quote.find("'(")?;
    let name: String = after_quote[..name_end].bytes().filter(|b| *b & 0x80 == 0).map(|b| b as char).collect();

    let after_name = &after_quote[name_end + 2..];
    let id_tag = after_name.strip_prefix("id:")?;
    let digits_end = id_tag.find(')')?;
    let id: i64 = id_tag[..digits_end].parse().ok()?;

    Some((name, id))
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
