//! The seam between the bridge and whatever renders the page.

use channel_common::BridgeError;
use url::Url;

/// Completion for one script evaluation.
///
/// `Ok` carries the JSON serialization of the script's return value as the
/// host reports it; see [`crate::json::unwrap_script_result`].
pub type ScriptCallback = Box<dyn FnOnce(Result<String, BridgeError>) + Send + 'static>;

/// An embedded page the bridge can load and run scripts in.
///
/// Evaluation is asynchronous and one-shot: the callback runs at most once,
/// on the host's UI thread. There is no timeout; a page that never answers
/// never completes.
pub trait ScriptHost {
    fn load_url(&mut self, url: &Url) -> Result<(), BridgeError>;

    /// Start evaluating `script`. An `Err` means evaluation never started and
    /// `on_complete` will not run.
    fn evaluate_script(&self, script: &str, on_complete: ScriptCallback) -> Result<(), BridgeError>;
}
