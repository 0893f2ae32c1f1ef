use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures along the page -> native message path.
///
/// None of these are fatal. The controller logs them and forwards them to
/// the listener's failure hook; only well-formed events reach the domain
/// callbacks.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bundled resource not found: {name}.{extension}")]
    ResourceNotFound { name: String, extension: String },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("no queued message in web view")]
    EmptyQueue,

    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid message: {0}")]
    InvalidEnvelope(String),

    #[error("invalid message sent from web view: unrecognized type {0:?}")]
    UnrecognizedType(String),

    #[error("webview error: {0}")]
    WebView(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("bridge.pop_script is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: bridge.pop_script is empty"
        );
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::ResourceNotFound {
            name: "channel".into(),
            extension: "html".into(),
        };
        assert_eq!(err.to_string(), "bundled resource not found: channel.html");

        let err = BridgeError::UnrecognizedType("unknown".into());
        assert_eq!(
            err.to_string(),
            "invalid message sent from web view: unrecognized type \"unknown\""
        );

        let err = BridgeError::NotAnObject("array");
        assert_eq!(err.to_string(), "expected a json object, found array");

        assert_eq!(
            BridgeError::EmptyQueue.to_string(),
            "no queued message in web view"
        );
    }

    #[test]
    fn bridge_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = json_err.into();
        assert!(matches!(err, BridgeError::Json(_)));
        assert!(err.to_string().starts_with("json decode error:"));
    }

    #[test]
    fn channel_error_from_bridge() {
        let err: ChannelError = BridgeError::Script("page crashed".into()).into();
        assert!(matches!(err, ChannelError::Bridge(_)));
        assert_eq!(err.to_string(), "script evaluation failed: page crashed");
    }

    #[test]
    fn channel_error_from_config() {
        let err: ChannelError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, ChannelError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn channel_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ChannelError = io_err.into();
        assert!(matches!(err, ChannelError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn channel_error_other() {
        let err = ChannelError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
