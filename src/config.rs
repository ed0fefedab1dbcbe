//! Tunable parameters for dominant-color extraction.
//!
//! Defaults match the behaviour the rest of the crate documents; a JSON file
//! may override any subset of them:
//!
//! ```no_run
//! use palette_harmony::ExtractionConfig;
//! use std::path::Path;
//!
//! let config = ExtractionConfig::from_json_file(Path::new("extraction.json"))?;
//! # Ok::<(), palette_harmony::PaletteError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Sample every n-th pixel along each axis
    pub sample_stride: u32,

    /// Stride is reduced for images that would yield fewer samples than this
    pub min_samples: usize,

    /// Fixed number of k-means iterations
    pub iterations: usize,

    /// Random candidates drawn per centroid during seeding
    pub seed_trials: usize,

    /// Minimum Euclidean RGB distance between returned colors
    pub min_distance: f64,

    /// Take every n-th sample into the replacement frequency table
    pub frequency_step: usize,

    /// Length of the sample prefix scanned for the frequency table
    pub frequency_limit: usize,

    /// Per-channel increment applied when no replacement color is found
    pub nudge: u8,

    /// Ignore fully transparent pixels while sampling
    pub skip_transparent: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sample_stride: 4,
            min_samples: 64,
            iterations: 15,
            seed_trials: 50,
            min_distance: 60.0,
            frequency_step: 10,
            frequency_limit: 1000,
            nudge: 30,
            skip_transparent: false,
        }
    }
}

impl ExtractionConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_stride == 0 {
            return Err(PaletteError::invalid_parameter("sample_stride", self.sample_stride));
        }
        if self.iterations == 0 {
            return Err(PaletteError::invalid_parameter("iterations", self.iterations));
        }
        if self.seed_trials == 0 {
            return Err(PaletteError::invalid_parameter("seed_trials", self.seed_trials));
        }
        if self.frequency_step == 0 {
            return Err(PaletteError::invalid_parameter("frequency_step", self.frequency_step));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(PaletteError::invalid_parameter("min_distance", self.min_distance));
        }
        Ok(())
    }
}
