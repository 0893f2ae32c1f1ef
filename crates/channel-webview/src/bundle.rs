//! Bundled page lookup and channel URL construction.

use std::path::{Path, PathBuf};

use channel_common::BridgeError;
use url::Url;

/// A directory of resources shipped with the application.
#[derive(Debug, Clone)]
pub struct Bundle {
    base_dir: PathBuf,
}

impl Bundle {
    /// Create a bundle rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Absolute path of `{name}.{extension}` inside the bundle.
    ///
    /// Returns `None` if the file is missing or resolves outside the bundle
    /// (symlinks, `..`).
    pub fn path_for_resource(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let file_path = self.base_dir.join(format!("{name}.{extension}"));

        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) || !canonical_file.is_file() {
            return None;
        }
        Some(canonical_file)
    }

    /// The base directory for resources.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// `file://` URL for `page_path` with `token` in the query string.
///
/// The token is form-encoded, so reserved characters cannot break out of
/// the parameter.
pub fn channel_url(page_path: &Path, token_param: &str, token: &str) -> Result<Url, BridgeError> {
    let mut url = Url::from_file_path(page_path).map_err(|()| {
        BridgeError::InvalidUrl(format!("{} is not an absolute path", page_path.display()))
    })?;
    url.query_pairs_mut().append_pair(token_param, token);
    Ok(url)
}
