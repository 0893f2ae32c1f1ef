/// Options for creating the channel web view.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(concat!("ChannelBridge/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl WebViewConfig {
    /// Default config with dev tools forced on or off.
    pub fn with_devtools(devtools: bool) -> Self {
        Self {
            devtools,
            ..Default::default()
        }
    }
}
