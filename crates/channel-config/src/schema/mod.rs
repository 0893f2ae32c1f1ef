//! Configuration schema types for the channel bridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod page;
mod system;

pub use bridge::*;
pub use page::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub bridge: BridgeConfig,
    pub page: PageConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
