//! Runtime configuration for the demo tools.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::prior::PriorBoxConfig;
use crate::types::{GridExtent, ImageExtent};

#[derive(Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    pub grid: GridExtent,
    pub image: ImageExtent,
    pub prior_box: PriorBoxConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
