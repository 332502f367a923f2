// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The client table: id-keyed accounting of connected time across
//! overlapping connections and across file (server-lifetime) boundaries.
//! Grounded on spec.md §4.7 directly; `ltc.c::log_conn`/`log_disconn`
//! only tracked a single connection per name with no overlap handling,
//! so the active-connection counting here is the superset spec.md
//! actually specifies, not a port of the original's simpler bookkeeping.

use std::collections::HashMap;

use crate::line::{Event, Kind};

/// One tracked client, keyed externally by id. `last_connected_at == 0`
/// means "not currently contributing to an open interval" — either
/// never connected or the interval already closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub last_connected_at: i64,
    pub total_connected_seconds: i64,
    pub active_conn_count: i64,
}

impl Client {
    fn new(id: i64, name: String) -> Self {
        Client { id, name, last_connected_at: 0, total_connected_seconds: 0, active_conn_count: 0 }
    }
}

#[derive(Debug, Default)]
pub struct ClientTable {
    clients: HashMap<i64, Client>,
}

impl ClientTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one parsed event to the table.
    pub fn apply(&mut self, event: &Event) {
        match event.kind {
            Kind::Connect => self.connect(event.id, &event.name, event.timestamp),
            Kind::Disconnect => self.disconnect(event.id, event.timestamp),
        }
    }

    /// CONNECT(id, name, t): locate or insert, then increment the active
    /// count. Only the connect that brings the count from 0 to 1 opens a
    /// new interval and is allowed to update the stored name.
    fn connect(&mut self, id: i64, name: &str, t: i64) {
        let client = self.clients.entry(id).or_insert_with(|| Client::new(id, name.to_string()));
        client.active_conn_count += 1;
        if client.active_conn_count == 1 {
            client.last_connected_at = t;
            if client.name != name {
                client.name = name.to_string();
            }
        }
    }

    /// DISCONNECT(id, t): a no-op for an unknown id or an already-zero
    /// count (the deliberately-ignored bare-disconnect-pair case from
    /// truncated logs). Only the disconnect that brings the count from 1
    /// to 0 closes the open interval and contributes to the total.
    fn disconnect(&mut self, id: i64, t: i64) {
        let Some(client) = self.clients.get_mut(&id) else { return };
        if client.active_conn_count == 0 {
            return;
        }
        if client.active_conn_count == 1 && client.last_connected_at > 0 {
            client.total_connected_seconds += t - client.last_connected_at;
            client.last_connected_at = 0;
        }
        client.active_conn_count -= 1;
    }

    /// File-boundary reset: zero every client's transient connection
    /// state, preserving `total_connected_seconds` and `name`. A client
    /// still "connected" at end-of-file is not credited for time past
    /// the file's last observed event.
    pub fn reset_file_boundary(&mut self) {
        for client in self.clients.values_mut() {
            client.active_conn_count = 0;
            client.last_connected_at = 0;
        }
    }

    pub fn into_clients(self) -> Vec<Client> {
        self.clients.into_values().collect()
    }

    #[cfg(test)]
    pub fn get(&self, id: i64) -> Option<&Client> {
        self.clients.get(&id)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
