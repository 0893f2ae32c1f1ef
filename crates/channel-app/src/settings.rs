//! Mapping from the config file to bridge and web view settings.

use channel_config::ChannelConfig;
use channel_webview::{BridgeSettings, Bundle, WebViewConfig};
use std::path::PathBuf;

pub fn bridge_settings(config: &ChannelConfig) -> BridgeSettings {
    BridgeSettings {
        sentinel_scheme: config.bridge.sentinel_scheme.clone(),
        pop_script: config.bridge.pop_script.clone(),
        token_param: config.bridge.token_param.clone(),
        page_name: config.page.name.clone(),
        page_extension: config.page.extension.clone(),
    }
}

pub fn webview_config(config: &ChannelConfig) -> WebViewConfig {
    WebViewConfig::with_devtools(config.window.devtools)
}

/// The bundle to load the page from; `--bundle` wins over the config.
pub fn bundle(config: &ChannelConfig, override_dir: Option<PathBuf>) -> Bundle {
    Bundle::new(override_dir.unwrap_or_else(|| config.page.bundle_dir.clone()))
}

/// Filter directive for the workspace crates at the configured level.
pub fn log_directive(config: &ChannelConfig) -> String {
    let level = config.logging.level.as_filter();
    format!("channel_bridge={level},channel_webview={level},channel_config={level}")
}
