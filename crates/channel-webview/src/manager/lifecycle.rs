use std::sync::{Arc, Mutex};

use channel_common::BridgeError;
use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::controller::{BridgeController, BridgeSettings};

use super::handle::WryHost;
use super::types::WebViewConfig;
use super::ChannelWebView;

impl ChannelWebView {
    /// Create the channel web view as a child of `window`.
    ///
    /// The view starts on a blank page; [`ChannelWebView::start`] loads the
    /// channel page once a token is available.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
        settings: BridgeSettings,
    ) -> Result<Self, BridgeError> {
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_focused(false)
            .with_html("<html><body></body></html>");

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // Sentinel navigations are cancelled here and popped in `pump`.
        // Sub-frame navigations reach wry's new-window handler on macOS.
        builder = Self::attach_navigation_handlers(
            builder,
            Arc::clone(&events),
            settings.sentinel_scheme.clone(),
        );
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));

        let webview = builder
            .build_as_child(window)
            .map_err(|e| BridgeError::WebView(e.to_string()))?;

        debug!(sentinel = %settings.sentinel_scheme, "channel WebView created");

        Ok(Self {
            controller: BridgeController::new(WryHost::new(webview), settings),
            events,
        })
    }
}
