//! Bridges a page-hosted real-time channel into native callbacks.
//!
//! The bundled page queues channel events and signals each one by
//! navigating to the sentinel scheme (`js-frame:`). The bridge cancels that
//! navigation, evaluates `popQueuedMessage()` in the page, decodes the JSON
//! envelope and invokes the registered [`ChannelListener`].
//!
//! - [`message`]: envelope decoding into [`BridgeMessage`]
//! - [`navigation`]: allow/cancel policy for navigation requests
//! - [`controller`]: [`BridgeController`], generic over a [`ScriptHost`]
//! - [`manager`]: the `wry` backed host and event pump

pub mod bundle;
pub mod controller;
pub mod events;
pub mod host;
pub mod json;
pub mod listener;
pub mod manager;
pub mod message;
pub mod navigation;

pub use bundle::{channel_url, Bundle};
pub use controller::{handle_script_result, BridgeController, BridgeSettings, ControllerState};
pub use events::{PageLoadState, WebViewEvent};
pub use host::{ScriptCallback, ScriptHost};
pub use json::JsonMap;
pub use listener::{ChannelListener, ListenerSlot, NoopListener};
pub use manager::{ChannelWebView, WebViewConfig, WryHost};
pub use message::{BridgeMessage, MessageKind};
pub use navigation::NavigationDecision;
