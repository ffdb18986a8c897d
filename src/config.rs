//! Editor configuration
//!
//! Defaults for the command-line front end, loadable from a JSON file.
//! Missing fields fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CutplayError, Result};

/// Autocut defaults used when a command does not give its own values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocutConfig {
    /// Quiet threshold as a percentage of the 16-bit magnitude range (default: 5)
    pub threshold_percent: u8,
    /// Shortest quiet run that gets removed, in seconds (default: 0.5)
    pub min_duration_secs: f64,
}

impl Default for AutocutConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 5,
            min_duration_secs: 0.5,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub autocut: AutocutConfig,
    /// Appended to the input file stem when no output path is given (default: "_edit")
    pub output_suffix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autocut: AutocutConfig::default(),
            output_suffix: "_edit".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CutplayError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.autocut.threshold_percent > 100 {
            return Err(CutplayError::Config {
                reason: format!(
                    "autocut.threshold_percent must be 0-100, got {}",
                    self.autocut.threshold_percent
                ),
            });
        }
        let min = self.autocut.min_duration_secs;
        if !min.is_finite() || min < 0.0 {
            return Err(CutplayError::Config {
                reason: format!("autocut.min_duration_secs must be >= 0, got {}", min),
            });
        }
        Ok(())
    }
}
