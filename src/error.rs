//! Error types for palette_harmony
//!
//! The clustering and harmony operations never fail; errors only arise at the
//! boundaries where raw bytes, strings or config files enter the crate.

use thiserror::Error;

/// Result type alias for palette_harmony operations
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    /// Raw pixel data does not hold `width * height` RGBA pixels
    #[error("Pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Unknown harmony mode: {0}")]
    UnknownHarmonyMode(String),

    #[error("Ring count {0} is outside 3..=12")]
    InvalidRingCount(usize),

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl PaletteError {
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}
