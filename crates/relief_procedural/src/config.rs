//! # Terrain Configuration
//!
//! TOML config loaded once at startup:
//!
//! ```toml
//! heights_file = "initial_terrain1.txt"
//! roughness = 0.5
//! max_random_height = 1.0
//! seed = 42            # omit for a different terrain every run
//!
//! [world]
//! x_size = 100.0
//! z_size = 100.0
//! vertical_scale = 1.0
//! ```

use std::path::{Path, PathBuf};

use relief_shared::Vec3;
use serde::Deserialize;

use crate::error::{TerrainError, TerrainResult};
use crate::synthesis::SynthesisParams;

/// Everything needed to generate one terrain.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerrainConfig {
    /// Control heights file. Relative paths resolve against the config file.
    pub heights_file: PathBuf,
    /// Roughness exponent `h`; higher is smoother.
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Base noise amplitude.
    #[serde(default = "default_max_random_height")]
    pub max_random_height: f32,
    /// Noise seed. `None` draws a fresh seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// How grid units map to world units.
    #[serde(default)]
    pub world: WorldScale,
}

fn default_roughness() -> f32 {
    0.5
}

fn default_max_random_height() -> f32 {
    1.0
}

impl TerrainConfig {
    /// Config with defaults for everything but the heights file.
    #[must_use]
    pub fn new(heights_file: impl Into<PathBuf>) -> Self {
        Self {
            heights_file: heights_file.into(),
            roughness: default_roughness(),
            max_random_height: default_max_random_height(),
            seed: None,
            world: WorldScale::default(),
        }
    }

    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys, or out-of-range values.
    pub fn from_toml_str(text: &str) -> TerrainResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file, resolving `heights_file` against its directory.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not validate.
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TerrainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if config.heights_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.heights_file = dir.join(&config.heights_file);
            }
        }
        tracing::info!("Loaded terrain config from {}", path.display());
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> TerrainResult<()> {
        if !self.roughness.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "roughness must be finite, got {}",
                self.roughness
            )));
        }
        if !self.max_random_height.is_finite() || self.max_random_height < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "max_random_height must be finite and >= 0, got {}",
                self.max_random_height
            )));
        }
        self.world.validate()
    }

    /// Synthesis parameters from this config.
    #[must_use]
    pub const fn synthesis_params(&self) -> SynthesisParams {
        SynthesisParams::new(self.roughness, self.max_random_height)
    }
}

/// Maps grid units to world units for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldScale {
    /// World extent along x.
    pub x_size: f32,
    /// World extent along z.
    pub z_size: f32,
    /// Multiplier on elevations.
    pub vertical_scale: f32,
}

impl Default for WorldScale {
    fn default() -> Self {
        Self {
            x_size: 100.0,
            z_size: 100.0,
            vertical_scale: 1.0,
        }
    }
}

impl WorldScale {
    /// Per-axis model scale for a mesh with `resolution` points per side.
    #[must_use]
    pub fn model_scale(&self, resolution: usize) -> Vec3 {
        let cells = resolution.saturating_sub(1).max(1) as f32;
        Vec3::new(self.x_size / cells, self.vertical_scale, self.z_size / cells)
    }

    /// Initial camera position: centred along x, level with the highest peak.
    #[must_use]
    pub fn spawn_point(&self, max_height: f32) -> Vec3 {
        Vec3::new(self.x_size / 2.0, self.vertical_scale * max_height, 0.0)
    }

    fn validate(&self) -> TerrainResult<()> {
        for (name, value) in [("x_size", self.x_size), ("z_size", self.z_size)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::InvalidConfig(format!(
                    "world.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.vertical_scale.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "world.vertical_scale must be finite, got {}",
                self.vertical_scale
            )));
        }
        Ok(())
    }
}
