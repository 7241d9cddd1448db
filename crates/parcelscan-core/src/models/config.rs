//! Configuration for the scan pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Main configuration for the parcelscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Field extraction settings.
    pub extraction: ExtractionConfig,
    /// Record validation settings.
    pub validation: ValidationConfig,
}

/// Field extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many blocks above the weight-unit header to search for the
    /// weight figure. Tuned against real label captures.
    pub weight_search_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            weight_search_window: 3,
        }
    }
}

/// Record validation settings. The minimum lengths come from real label
/// samples; the shortest plausible values observed set the thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum plausible destination address length, in characters.
    pub min_to_address_len: usize,
    /// Minimum plausible sender address length, in characters.
    pub min_from_address_len: usize,
    /// Minimum plausible barcode length, in characters.
    pub min_barcode_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_to_address_len: 9,
            min_from_address_len: 11,
            min_barcode_len: 7,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ScanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
