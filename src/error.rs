//! Error types for map generation.

use thiserror::Error;

/// Errors that can occur while configuring or validating a map.
///
/// Boundary conditions of the graph (edges without a corner, corners the
/// elevation pass cannot reach, empty input) are not errors.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("invalid map dimensions {width}x{height}: both must be positive and finite")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("sample count must be positive")]
    InvalidSampleCount,
    #[error("lake threshold {0} is outside (0, 1]")]
    InvalidLakeThreshold(f64),
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for map generation.
pub type Result<T> = std::result::Result<T, MapError>;
