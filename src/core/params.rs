use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::{ExtensionFilter, ExtensionMatch, Tolerance};

/// Subdirectories of the assets root processed when none are configured.
pub const DEFAULT_SUBDIRS: [&str; 4] = ["character", "monster", "weapon", "gem"];

/// Processing parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    pub tolerance: Tolerance,
    /// File suffix to process, without the leading dot
    pub extension: String,
    pub extension_match: ExtensionMatch,
    /// Named subdirectories of the root, processed in this order
    pub subdirs: Vec<String>,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            extension: "png".to_string(),
            extension_match: ExtensionMatch::Exact,
            subdirs: DEFAULT_SUBDIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProcessingParams {
    /// Load a JSON preset. Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let params: ProcessingParams = serde_json::from_str(&text)?;
        debug!("Loaded processing params from {:?}: {:?}", path, params);
        Ok(params)
    }

    pub fn extension_filter(&self) -> Result<ExtensionFilter> {
        ExtensionFilter::new(&self.extension, self.extension_match)
    }
}
