use std::sync::Mutex;

use channel_common::BridgeError;
use url::Url;
use wry::WebView;

use crate::host::{ScriptCallback, ScriptHost};

/// [`ScriptHost`] backed by a `wry` web view.
pub struct WryHost {
    webview: WebView,
}

impl WryHost {
    pub fn new(webview: WebView) -> Self {
        Self { webview }
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), BridgeError> {
        self.webview.set_bounds(bounds).map_err(webview_error)
    }
}

impl ScriptHost for WryHost {
    fn load_url(&mut self, url: &Url) -> Result<(), BridgeError> {
        self.webview.load_url(url.as_str()).map_err(webview_error)
    }

    fn evaluate_script(&self, script: &str, on_complete: ScriptCallback) -> Result<(), BridgeError> {
        // wry takes an `Fn`; the completion must still run only once.
        let pending = Mutex::new(Some(on_complete));
        self.webview
            .evaluate_script_with_callback(script, move |result| {
                let callback = pending.lock().ok().and_then(|mut slot| slot.take());
                if let Some(callback) = callback {
                    callback(Ok(result));
                }
            })
            .map_err(|e| BridgeError::Script(e.to_string()))
    }
}

fn webview_error(e: wry::Error) -> BridgeError {
    BridgeError::WebView(e.to_string())
}
