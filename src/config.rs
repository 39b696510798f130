use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::algorithms::Protocol;
use crate::report::ReportFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub protocol: Protocol,
    pub format: ReportFormat,
    pub output: PathBuf,
    /// Change-file cost that means "remove this link" instead of re-pricing it.
    pub removal_sentinel: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::DistanceVector,
            format: ReportFormat::Text,
            output: PathBuf::from("output.txt"),
            removal_sentinel: -999,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }
}
