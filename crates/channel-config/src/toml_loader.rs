//! Reading, validating and seeding the TOML config file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use channel_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ChannelConfig;
use crate::validation;

/// Read and validate the config at `path`.
///
/// Missing keys take their serde defaults. A file that parses but fails
/// validation is replaced by the defaults, with a warning.
pub fn load_from_path(path: &Path) -> Result<ChannelConfig, ConfigError> {
    let config = read_config(path)?;
    info!(path = %path.display(), "config loaded");
    Ok(validated_or_default(config))
}

/// Load `config.toml` from the platform config directory, seeding it with
/// the commented template on first run.
pub fn load_default() -> Result<ChannelConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            write_default_config(&path)?;
            Ok(ChannelConfig::default())
        }
        loaded => loaded,
    }
}

/// `<config dir>/channel-bridge/config.toml`, e.g. `~/.config/...` on Linux
/// and `~/Library/Application Support/...` on macOS.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("channel-bridge").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`. An existing file is left alone.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |e: std::io::Error| {
        ConfigError::ParseError(format!("cannot write {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(io_error(e)),
    };
    file.write_all(default_config_toml().as_bytes()).map_err(io_error)?;

    info!(path = %path.display(), "default config written");
    Ok(())
}

/// Parse a config document without validating it.
pub fn parse_config(content: &str) -> Result<ChannelConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))
}

fn read_config(path: &Path) -> Result<ChannelConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("cannot read {}: {e}", path.display())),
    })?;
    parse_config(&content)
}

fn validated_or_default(config: ChannelConfig) -> ChannelConfig {
    match validation::validate(&config) {
        Ok(()) => config,
        Err(e) => {
            warn!(error = %e, "invalid config, using defaults");
            ChannelConfig::default()
        }
    }
}

fn default_config_toml() -> &'static str {
    r##"# Channel bridge configuration
# Every key is optional; commented values are the defaults.

[bridge]
# sentinel_scheme = "js-frame"       # navigations to this scheme signal a queued message
# pop_script = "popQueuedMessage()"  # evaluated once per signal
# token_param = "token"

[page]
# name = "channel"
# extension = "html"
# bundle_dir = "assets"

[window]
# title = "Channel Bridge"
# width = 480            # 200-8192
# height = 320           # 200-8192
# devtools = false

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
}
