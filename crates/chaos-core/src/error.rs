//! Error types for the chaos crates

use thiserror::Error;

/// The main error type for loading and configuring effects
#[derive(Debug, Error)]
pub enum ChaosError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Palette error: {0}")]
    PaletteError(String),

    #[error("Layout error: {0}")]
    LayoutError(String),
}

/// Result type alias for chaos operations
pub type Result<T> = std::result::Result<T, ChaosError>;

impl From<toml::de::Error> for ChaosError {
    fn from(err: toml::de::Error) -> Self {
        ChaosError::TomlParseError(err.to_string())
    }
}
