//! `wry` hosting for the bridge.
//!
//! wry's navigation handler is installed before the web view exists, so it
//! cannot evaluate scripts itself. It records events into a shared sink;
//! the owner's event loop calls [`ChannelWebView::pump`], which pops one
//! queued message per recorded sentinel navigation.

use std::sync::{Arc, Mutex};

use channel_common::BridgeError;

use crate::bundle::Bundle;
use crate::controller::{BridgeController, ControllerState};
use crate::events::WebViewEvent;
use crate::listener::ChannelListener;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WryHost;
pub use types::WebViewConfig;

/// The channel page hosted in a child web view.
pub struct ChannelWebView {
    controller: BridgeController<WryHost>,
    /// Event sink; handlers push, `pump` drains.
    events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl ChannelWebView {
    /// Register the listener for channel events.
    pub fn register_listener<L: ChannelListener + 'static>(&self, listener: &Arc<L>) {
        self.controller.register_listener(listener);
    }

    /// Load the channel page for `token`.
    pub fn start(&mut self, token: &str, bundle: &Bundle) -> Result<ControllerState, BridgeError> {
        self.controller.start(token, bundle)
    }

    pub fn controller(&self) -> &BridgeController<WryHost> {
        &self.controller
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), BridgeError> {
        self.controller.host().set_bounds(bounds)
    }

    /// Drain recorded events, popping one message per sentinel navigation.
    /// Returns how many pops were issued.
    pub fn pump(&self) -> usize {
        handlers::drain_events(&self.events, &self.controller)
    }
}
