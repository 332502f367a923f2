// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relay of module stdout/stderr into the shared log sink, tagged with
//! the owning module's bracketed name.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};

/// A fixed chunk size, reused across reads, matching the original
/// relay's single reusable buffer rather than allocating per line.
const RELAY_CHUNK: usize = 2048;

/// Shared append destination for both the supervisor's own tracing
/// output and the relayed module output, so both land in one file in
/// the order they were written, the way `do_log`/`read_mod_input` both
/// wrote through `STDOUT_FILENO`.
pub struct LogSink {
    file: Mutex<std::fs::File>,
}

impl LogSink {
    pub fn new(file: std::fs::File) -> Arc<Self> {
        Arc::new(LogSink { file: Mutex::new(file) })
    }

    /// Write one already-tagged chunk, ensuring the chunk ends with a
    /// newline.
    pub fn write_tagged(&self, module_name: &str, chunk: &[u8]) -> std::io::Result<()> {
        let mut guard = self.file.lock();
        write!(guard, "[{module_name}] ")?;
        guard.write_all(chunk)?;
        if !chunk.ends_with(b"\n") {
            guard.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Drain a module's combined stdout/stderr pipe until EOF, forwarding
/// each chunk to the sink tagged with `module_name`. Spawned as its own
/// task per running module; the pipe read end is non-blocking by virtue
/// of being a Tokio-async `ChildStdout`/`ChildStderr`, so draining it
/// never blocks the rest of the event loop.
pub async fn relay<R>(mut reader: R, module_name: &'static str, sink: Arc<LogSink>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; RELAY_CHUNK];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = sink.write_tagged(module_name, &buf[..n]) {
                    tracing::error!("failed to write log sink for {}: {}", module_name, e);
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("read error on {} pipe: {}", module_name, e);
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "logsink_tests.rs"]
mod tests;
