// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ranked report formatting, per spec.md §4.9. `ltc.c::print_table` only
//! ever printed insertion order with no selection or duration
//! formatting; the ranked modes and `-s` toggle here are the fuller
//! behavior spec.md specifies.

use crate::client::Client;

/// Which slice of the ascending-by-total ranking to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every client, ascending.
    All,
    /// The first `N` entries (lowest totals).
    Lowest(usize),
    /// The last `N` entries, printed highest-first.
    Highest(usize),
}

/// Render the selected clients as tab-separated `<duration>\t<name>\n`
/// rows, sorted per `mode`.
pub fn render(mut clients: Vec<Client>, mode: Mode, raw_seconds: bool) -> String {
    clients.sort_by_key(|c| c.total_connected_seconds);

    let selected: Vec<Client> = match mode {
        Mode::All => clients,
        Mode::Lowest(n) => clients.into_iter().take(n).collect(),
        Mode::Highest(n) => clients.into_iter().rev().take(n).collect(),
    };

    let mut out = String::new();
    for client in &selected {
        if raw_seconds {
            out.push_str(&client.total_connected_seconds.to_string());
        } else {
            out.push_str(&format_duration(client.total_connected_seconds));
        }
        out.push('\t');
        out.push_str(&client.name);
        out.push('\n');
    }
    out
}

/// `<D>d <H>h <M>m <S>s` via integer division by 86400/3600/60, per
/// spec.md §4.9.
fn format_duration(total_seconds: i64) -> String {
    let days = total_seconds / 86400;
    let hours = (total_seconds % 86400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
