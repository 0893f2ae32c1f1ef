//! Subscriber setup.
//!
//! `RUST_LOG` wins over the config file's level; `--log-level` is applied
//! on top of whichever of the two was used.

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber.
pub fn init(config_directives: &str, cli_override: Option<&str>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), config_directives, cli_override);
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the filter from an optional `RUST_LOG` value, the config-derived
/// directives and the optional CLI override.
///
/// An empty or unparsable `RUST_LOG` counts as unset.
pub fn build_filter(
    rust_log: Option<&str>,
    config_directives: &str,
    cli_override: Option<&str>,
) -> EnvFilter {
    let base = rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| with_directives(EnvFilter::default(), config_directives));

    match cli_override {
        Some(directives) => with_directives(base, directives),
        None => base,
    }
}

/// Add each comma-separated directive; unparsable entries become `info`.
fn with_directives(filter: EnvFilter, directives: &str) -> EnvFilter {
    directives
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .fold(filter, |filter, d| {
            let directive = d
                .parse::<Directive>()
                .unwrap_or_else(|_| LevelFilter::INFO.into());
            filter.add_directive(directive)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_INFO: &str = "channel_bridge=info,channel_webview=info,channel_config=info";
    const CONFIG_WARN: &str = "channel_bridge=warn,channel_webview=warn,channel_config=warn";

    #[test]
    fn config_level_used_without_rust_log() {
        let filter = build_filter(None, CONFIG_WARN, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn rust_log_is_not_overridden_by_config() {
        let filter = build_filter(Some("channel_webview=trace"), CONFIG_INFO, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn empty_or_invalid_rust_log_falls_back_to_config() {
        for rust_log in ["", "   ", "channel_webview=loud"] {
            let filter = build_filter(Some(rust_log), CONFIG_WARN, None);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN), "{rust_log:?}");
        }
    }

    #[test]
    fn cli_override_applies_on_top_of_rust_log() {
        let filter = build_filter(Some("warn"), CONFIG_INFO, Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn cli_override_applies_on_top_of_config() {
        let filter = build_filter(None, CONFIG_WARN, Some("channel_webview=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
