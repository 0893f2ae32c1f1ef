//! Page <-> native protocol settings.

use serde::{Deserialize, Serialize};

/// Protocol knobs shared with the page script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// URL scheme the page navigates to when a message is queued.
    /// Navigations to it are always cancelled.
    pub sentinel_scheme: String,
    /// Expression evaluated in the page to dequeue one message.
    pub pop_script: String,
    /// Query parameter carrying the channel token.
    pub token_param: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            sentinel_scheme: "js-frame".into(),
            pop_script: "popQueuedMessage()".into(),
            token_param: "token".into(),
        }
    }
}
