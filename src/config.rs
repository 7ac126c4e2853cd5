//! Unified configuration system for map generation.
//!
//! All generation parameters are centralized here. Every field has a
//! default, so a TOML file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_LAKE_THRESHOLD;
use crate::error::{MapError, Result};
use crate::geometry::BoundingBox;
use crate::island::IslandShapeKind;
use crate::pointgen::PointGeneratorConfig;

/// Complete configuration for map generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    // ===== Basic Map Settings =====
    /// Map width; the map spans `0..width`.
    pub width: f64,
    /// Map height; the map spans `0..height`.
    pub height: f64,
    /// Number of Voronoi cells.
    pub num_points: usize,
    /// Random seed for points and island shape.
    pub seed: u64,
    /// Lloyd relaxation iterations.
    pub lloyd_iterations: u32,

    // ===== Island Settings =====
    /// Island shape type.
    pub island_shape: IslandShapeKind,
    /// Fraction of water corners that turns a polygon into water.
    pub lake_threshold: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            num_points: 2000,
            seed: 12345,
            lloyd_iterations: 2,
            island_shape: IslandShapeKind::Radial,
            lake_threshold: DEFAULT_LAKE_THRESHOLD,
        }
    }
}

impl GenerationConfig {
    /// Create config with custom seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Default::default() }
    }

    /// Create a smaller config for faster tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            num_points: 300,
            seed,
            ..Default::default()
        }
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that cannot produce a map.
    pub fn validate(&self) -> Result<()> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.num_points == 0 {
            return Err(MapError::InvalidSampleCount);
        }
        if !(self.lake_threshold > 0.0 && self.lake_threshold <= 1.0) {
            return Err(MapError::InvalidLakeThreshold(self.lake_threshold));
        }
        Ok(())
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_size(self.width, self.height)
    }

    pub fn point_config(&self) -> PointGeneratorConfig {
        PointGeneratorConfig {
            bounds: self.bounds(),
            num_points: self.num_points,
            seed: self.seed,
            lloyd_iterations: self.lloyd_iterations,
        }
    }
}

/// Presets for common island styles.
pub mod presets {
    use super::GenerationConfig;
    use crate::island::IslandShapeKind;

    /// Many small lakes inland.
    pub fn lake_district(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            lake_threshold: 0.15,
            ..Default::default()
        }
    }

    /// Noise coastline with scattered islets.
    pub fn archipelago(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            island_shape: IslandShapeKind::Perlin,
            num_points: 4000,
            ..Default::default()
        }
    }
}
