//! Listener that logs channel events and keeps per-kind counts.

use std::sync::atomic::{AtomicUsize, Ordering};

use channel_common::BridgeError;
use channel_webview::{ChannelListener, JsonMap};

#[derive(Debug, Default)]
pub struct LoggingListener {
    opens: AtomicUsize,
    messages: AtomicUsize,
    closes: AtomicUsize,
    errors: AtomicUsize,
    failures: AtomicUsize,
}

/// Snapshot of a [`LoggingListener`]'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub opens: usize,
    pub messages: usize,
    pub closes: usize,
    pub errors: usize,
    pub failures: usize,
}

impl EventCounts {
    /// Events that reached a domain callback.
    pub fn delivered(&self) -> usize {
        self.opens + self.messages + self.closes + self.errors
    }
}

impl LoggingListener {
    pub fn counts(&self) -> EventCounts {
        EventCounts {
            opens: self.opens.load(Ordering::Relaxed),
            messages: self.messages.load(Ordering::Relaxed),
            closes: self.closes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl ChannelListener for LoggingListener {
    fn on_open(&self) {
        self.opens.fetch_add(1, Ordering::Relaxed);
        tracing::info!("channel opened");
    }

    fn on_message(&self, data: JsonMap) {
        self.messages.fetch_add(1, Ordering::Relaxed);
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        tracing::info!(?keys, "channel message");
        tracing::debug!(data = %serde_json::Value::Object(data), "channel message body");
    }

    fn on_close(&self) {
        self.closes.fetch_add(1, Ordering::Relaxed);
        tracing::info!("channel closed");
    }

    fn on_error(&self, code: i32, description: &str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(code, description, "channel error");
    }

    fn on_bridge_failure(&self, error: &BridgeError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(error = %error, "bridge failure");
    }
}
