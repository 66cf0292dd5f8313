//! Reading the declared version of a project

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PublishError, Result};

/// Default manifest file name inside a project root
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Source of a project's declared version
pub trait ManifestReader: Send + Sync {
    /// Declared version, `Ok(None)` when the manifest is missing or has none.
    ///
    /// Returns [`PublishError::ManifestRead`] when the file exists but cannot
    /// be read or parsed; callers treat that as "no version".
    fn read_version(&self, manifest_path: &Path) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Reads the `version` field of a JSON manifest such as `package.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestReader;

impl ManifestReader for JsonManifestReader {
    fn read_version(&self, manifest_path: &Path) -> Result<Option<String>> {
        if !manifest_path.exists() {
            return Ok(None);
        }

        let read_error = |reason: String| PublishError::ManifestRead {
            path: manifest_path.to_path_buf(),
            reason,
        };
        let content = fs::read_to_string(manifest_path).map_err(|e| read_error(e.to_string()))?;
        let manifest: PackageManifest =
            serde_json::from_str(&content).map_err(|e| read_error(e.to_string()))?;

        // a non-string version (e.g. a number) is treated as undeclared
        Ok(manifest
            .version
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|v| !v.is_empty()))
    }
}
