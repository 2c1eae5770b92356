//! User-facing message sinks.
//!
//! Breakage announcements ("Rei's Iron Sword broke!") go through a
//! [`MessageSink`] so hosts can route them into their own battle log. The
//! default sink forwards to `tracing`; tests capture into a buffer.

use std::sync::Mutex;

use tracing::info;

/// Receiver for player-visible messages produced during dispatch.
pub trait MessageSink: Send + Sync {
    fn publish(&self, message: &str);
}

/// Sink that forwards messages to the `tracing` subscriber at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn publish(&self, message: &str) {
        info!(target: "runtime::messages", "{message}");
    }
}

/// Sink that collects messages in memory, for tests and replay UIs.
#[derive(Debug, Default)]
pub struct BufferSink {
    messages: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Takes everything published so far, leaving the buffer empty.
    pub fn drain(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl MessageSink for BufferSink {
    fn publish(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
