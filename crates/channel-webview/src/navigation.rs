//! Navigation policy for the channel page.
//!
//! The page never navigates to the sentinel scheme for real: such a request
//! only means "a message is queued". Everything else proceeds untouched.

use tracing::debug;
use url::Url;

/// Default sentinel scheme used by `channel.html`.
pub const SENTINEL_SCHEME: &str = "js-frame";

/// What to do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Cancel,
}

impl NavigationDecision {
    /// The boolean `wry` navigation handlers return.
    pub fn allows(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Lowercased scheme of `url`, or `None` if it has none.
pub fn url_scheme(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .map(|parsed| parsed.scheme().to_owned())
}

/// Decide a navigation to `url` given the sentinel scheme.
///
/// The requested URL is inspected, not the page's current one. A URL with no
/// scheme is allowed and takes no bridge action.
pub fn decide(url: &str, sentinel_scheme: &str) -> NavigationDecision {
    match url_scheme(url) {
        Some(scheme) if scheme.eq_ignore_ascii_case(sentinel_scheme) => NavigationDecision::Cancel,
        Some(_) => NavigationDecision::Allow,
        None => {
            debug!(url = %url, "navigation without scheme, ignoring");
            NavigationDecision::Allow
        }
    }
}
