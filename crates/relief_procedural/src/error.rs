//! # Terrain Error Types
//!
//! Every failure that can stop terrain generation. All of them are fatal for
//! the caller: there is no partial terrain and nothing to retry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading inputs for terrain generation.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// The heights description ended before a required header token.
    #[error("missing {0} in heights header")]
    MissingHeader(&'static str),

    /// A header token is not an integer.
    #[error("{field} must be an integer, got {token:?}")]
    InvalidExponent {
        /// Which header field was malformed.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// A header exponent is below zero.
    #[error("{field} must be >= 0, got {value}")]
    NegativeExponent {
        /// Which header field was malformed.
        field: &'static str,
        /// The parsed value.
        value: i64,
    },

    /// A header exponent would produce a grid too large to index with `u32`.
    #[error("{field} {value} exceeds the supported maximum of {max}")]
    ExponentTooLarge {
        /// Which header field was malformed.
        field: &'static str,
        /// The parsed value.
        value: i64,
        /// Largest accepted exponent.
        max: u32,
    },

    /// The dense grid would be coarser than the control grid.
    #[error("resolution exponent {resolution} is below grid size exponent {grid}")]
    ResolutionBelowGrid {
        /// Grid size exponent.
        grid: u32,
        /// Resolution exponent.
        resolution: u32,
    },

    /// An elevation token is not a finite number.
    #[error("elevation #{index} is not a finite number: {token:?}")]
    InvalidElevation {
        /// Zero-based row-major position of the elevation.
        index: usize,
        /// The offending token.
        token: String,
    },

    /// The heights description ran out of elevation tokens.
    #[error("not enough elevations: expected {expected}, got {found}")]
    NotEnoughElevations {
        /// `grid_size * grid_size`.
        expected: usize,
        /// Tokens actually present.
        found: usize,
    },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML config could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
