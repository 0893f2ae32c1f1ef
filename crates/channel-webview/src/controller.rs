//! The bridge controller: page load, navigation interception and dispatch.

use std::sync::Arc;

use channel_common::BridgeError;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::bundle::{self, Bundle};
use crate::host::ScriptHost;
use crate::json;
use crate::listener::{ChannelListener, ListenerSlot};
use crate::message::BridgeMessage;
use crate::navigation::{self, NavigationDecision, SENTINEL_SCHEME};

/// Protocol settings shared with the page script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    pub sentinel_scheme: String,
    pub pop_script: String,
    pub token_param: String,
    pub page_name: String,
    pub page_extension: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            sentinel_scheme: SENTINEL_SCHEME.into(),
            pop_script: "popQueuedMessage()".into(),
            token_param: "token".into(),
            page_name: "channel".into(),
            page_extension: "html".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No token supplied yet; the page has not been loaded.
    Uninitialized,
    /// The channel page is loading or loaded and bridging messages.
    Active,
}

/// Drives one channel page inside a [`ScriptHost`].
pub struct BridgeController<H: ScriptHost> {
    host: H,
    settings: BridgeSettings,
    listener: Arc<ListenerSlot>,
    state: ControllerState,
    page_url: Option<Url>,
}

impl<H: ScriptHost> BridgeController<H> {
    pub fn new(host: H, settings: BridgeSettings) -> Self {
        Self {
            host,
            settings,
            listener: Arc::new(ListenerSlot::new()),
            state: ControllerState::Uninitialized,
            page_url: None,
        }
    }

    /// Register the listener events are delivered to. The controller does
    /// not keep it alive.
    pub fn register_listener<L: ChannelListener + 'static>(&self, listener: &Arc<L>) {
        self.listener.register(listener);
    }

    pub fn listener_slot(&self) -> &Arc<ListenerSlot> {
        &self.listener
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// URL of the loaded channel page, token included.
    pub fn page_url(&self) -> Option<&Url> {
        self.page_url.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Load the channel page for `token`.
    ///
    /// An empty token loads nothing and leaves the controller
    /// uninitialized. A missing page is an error and nothing is loaded.
    pub fn start(&mut self, token: &str, bundle: &Bundle) -> Result<ControllerState, BridgeError> {
        if token.is_empty() {
            warn!("empty channel token, page not loaded");
            return Ok(self.state);
        }

        let name = &self.settings.page_name;
        let extension = &self.settings.page_extension;
        let page = bundle.path_for_resource(name, extension).ok_or_else(|| {
            BridgeError::ResourceNotFound {
                name: name.clone(),
                extension: extension.clone(),
            }
        })?;

        let url = bundle::channel_url(&page, &self.settings.token_param, token)?;
        self.host.load_url(&url)?;

        info!(page = %page.display(), "channel page loading");
        self.page_url = Some(url);
        self.state = ControllerState::Active;
        Ok(self.state)
    }

    /// Decide a navigation request; a sentinel navigation also pulls one
    /// queued message from the page.
    pub fn handle_navigation(&self, url: &str) -> NavigationDecision {
        let decision = navigation::decide(url, &self.settings.sentinel_scheme);
        if decision == NavigationDecision::Cancel {
            debug!("sentinel navigation, popping queued message");
            // Failures are logged and reported inside.
            let _ = self.pop_queued_message();
        }
        decision
    }

    /// Evaluate the pop script once and dispatch whatever it returns.
    pub fn pop_queued_message(&self) -> Result<(), BridgeError> {
        let slot = Arc::clone(&self.listener);
        let started = self.host.evaluate_script(
            &self.settings.pop_script,
            Box::new(move |result| handle_script_result(&slot, result)),
        );

        if let Err(e) = &started {
            error!(error = %e, "failed to start pop script");
            self.listener.report_failure(e);
        }
        started
    }
}

/// Completion of one pop: decode the result and deliver it.
///
/// Evaluation errors, empty queues and undecodable messages are logged and
/// go to [`ChannelListener::on_bridge_failure`]; no domain callback fires.
pub fn handle_script_result(slot: &ListenerSlot, result: Result<String, BridgeError>) {
    let message = result
        .and_then(|raw| json::unwrap_script_result(&raw))
        .and_then(|text| BridgeMessage::parse(&text));

    match message {
        Ok(message) => {
            debug!(kind = message.kind().as_type(), "dispatching channel event");
            slot.dispatch(message);
        }
        Err(err) => {
            match &err {
                BridgeError::Script(_) | BridgeError::WebView(_) => {
                    error!(error = %err, "pop script failed");
                }
                BridgeError::EmptyQueue => debug!("sentinel navigation with empty queue"),
                BridgeError::UnrecognizedType(kind) => {
                    warn!(kind = %kind, "invalid message sent from web view");
                }
                _ => warn!(error = %err, "invalid message"),
            }
            slot.report_failure(&err);
        }
    }
}
