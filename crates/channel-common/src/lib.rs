//! Shared types for the channel bridge crates.

pub mod errors;

pub use errors::{BridgeError, ChannelError, ConfigError};

pub type Result<T> = std::result::Result<T, ChannelError>;
