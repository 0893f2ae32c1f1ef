//! Offline replay of queued messages through the bridge.
//!
//! Each input line is what `popQueuedMessage()` would return for one
//! sentinel navigation. Lines go through the same navigation and dispatch
//! path the web view uses.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use channel_common::{BridgeError, ChannelError};
use channel_webview::{BridgeController, BridgeSettings, ScriptCallback, ScriptHost};
use url::Url;

use crate::listener::{EventCounts, LoggingListener};

/// A [`ScriptHost`] that answers every evaluation with the next queued line.
#[derive(Debug, Default)]
pub struct ReplayHost {
    queue: RefCell<VecDeque<String>>,
    evaluations: Cell<usize>,
}

impl ReplayHost {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            queue: RefCell::new(lines.into_iter().collect()),
            evaluations: Cell::new(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }
}

impl ScriptHost for ReplayHost {
    fn load_url(&mut self, url: &Url) -> Result<(), BridgeError> {
        tracing::debug!(path = url.path(), "replay host ignores page load");
        Ok(())
    }

    fn evaluate_script(&self, _script: &str, on_complete: ScriptCallback) -> Result<(), BridgeError> {
        self.evaluations.set(self.evaluations.get() + 1);
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(line) => on_complete(Ok(line)),
            None => on_complete(Err(BridgeError::EmptyQueue)),
        }
        Ok(())
    }
}

/// Read replay input: a file path, or `-` for stdin. Blank lines are skipped.
pub fn read_lines(input: &Path) -> Result<Vec<String>, ChannelError> {
    let lines = if input == Path::new("-") {
        collect_lines(std::io::stdin().lock())?
    } else {
        let file = std::fs::File::open(input)?;
        collect_lines(std::io::BufReader::new(file))?
    };
    Ok(lines)
}

fn collect_lines(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .collect()
}

/// Replay `lines`, one sentinel navigation each, and return what the
/// listener saw.
pub fn replay(lines: Vec<String>, settings: BridgeSettings) -> EventCounts {
    let total = lines.len();
    let sentinel = format!("{}:", settings.sentinel_scheme);
    let controller = BridgeController::new(ReplayHost::new(lines), settings);
    let listener = Arc::new(LoggingListener::default());
    controller.register_listener(&listener);

    for _ in 0..total {
        controller.handle_navigation(&sentinel);
    }

    let counts = listener.counts();
    tracing::info!(
        total,
        delivered = counts.delivered(),
        failed = counts.failures,
        "replay finished"
    );
    counts
}
