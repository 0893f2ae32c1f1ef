//! Channel bridge configuration.
//!
//! TOML-based configuration with validation. All sections have defaults so
//! partial configs work out of the box.
//!
//! ```rust,no_run
//! let config = channel_config::load_config().expect("failed to load config");
//! println!("{}", channel_config::config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ChannelConfig, CONFIG_SCHEMA_VERSION};

use channel_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path.
pub fn load_config() -> Result<ChannelConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (`--config`).
///
/// Invalid values are replaced by the defaults; see
/// [`toml_loader::load_from_path`].
pub fn load_config_from(path: &Path) -> Result<ChannelConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ChannelConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
