//! Full configuration validation.
//!
//! Collects every problem before failing so a bad file reports all of them.

use crate::schema::ChannelConfig;
use channel_common::ConfigError;
use url::Url;

/// Schemes a page navigates to for real; using one as the sentinel would
/// cancel ordinary navigation.
const RESERVED_SCHEMES: &[&str] = &["http", "https", "file", "about", "data", "javascript"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChannelConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let scheme = config.bridge.sentinel_scheme.as_str();
    if RESERVED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        errors.push(format!("bridge.sentinel_scheme = {scheme:?} is a navigable scheme"));
    } else if !is_valid_scheme(scheme) {
        errors.push(format!("bridge.sentinel_scheme = {scheme:?} is not a valid URL scheme"));
    }

    if config.bridge.pop_script.trim().is_empty() {
        errors.push("bridge.pop_script is empty".into());
    }

    let param = config.bridge.token_param.as_str();
    if param.is_empty() || param.contains(['&', '=', '#']) {
        errors.push(format!("bridge.token_param = {param:?} is not a usable query key"));
    }

    validate_file_component(&mut errors, "page.name", &config.page.name);
    validate_file_component(&mut errors, "page.extension", &config.page.extension);

    validate_range(&mut errors, "window.width", config.window.width, 200, 8192);
    validate_range(&mut errors, "window.height", config.window.height, 200, 8192);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// A scheme is valid if `"{scheme}:"` parses as a URL with exactly that
/// scheme. The parser strips whitespace and tabs, hence the comparison.
fn is_valid_scheme(scheme: &str) -> bool {
    Url::parse(&format!("{scheme}:"))
        .map(|url| url.scheme() == scheme.to_ascii_lowercase())
        .unwrap_or(false)
}

fn validate_file_component(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.is_empty() {
        errors.push(format!("{name} is empty"));
    } else if value.contains(['/', '\\']) || value == ".." {
        errors.push(format!("{name} = {value:?} must not contain path separators"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
