// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The owning context threaded through every component: the module
//! table, the log sink, and the shutdown notification — replacing the
//! original's file-scope `struct manager` static with a value
//! constructed once in `main` and passed explicitly.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::logsink::LogSink;
use crate::module::ModuleTable;

pub struct SupervisorContext {
    pub table: Arc<Mutex<ModuleTable>>,
    pub sink: Arc<LogSink>,
    /// Notified once when a `stop` command flips `table.stopped`; the
    /// event loop's `select!` wakes on it instead of re-checking a poll
    /// timeout.
    pub shutdown: Arc<Notify>,
}

impl SupervisorContext {
    pub fn new(table: ModuleTable, sink: Arc<LogSink>) -> Self {
        SupervisorContext { table: Arc::new(Mutex::new(table)), sink, shutdown: Arc::new(Notify::new()) }
    }

    pub fn request_stop(&self) {
        self.table.lock().stopped = true;
        self.shutdown.notify_one();
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
