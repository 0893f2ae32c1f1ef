use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Bundled page location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    pub name: String,
    pub extension: String,
    /// Directory holding bundled resources. Relative paths resolve against
    /// the working directory.
    pub bundle_dir: PathBuf,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            name: "channel".into(),
            extension: "html".into(),
            bundle_dir: PathBuf::from("assets"),
        }
    }
}
