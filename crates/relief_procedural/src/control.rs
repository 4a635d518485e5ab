//! # Control Grid
//!
//! The small, user-authored grid of authoritative elevations.
//!
//! ## File Format
//!
//! Whitespace-delimited tokens with no fixed line structure:
//!
//! ```text
//! <grid_size_exponent> <resolution_exponent>
//! <elevation_0> <elevation_1> ... <elevation_{(2^g+1)^2 - 1}>
//! ```
//!
//! Elevations are row-major. The control grid has `2^g + 1` points per side;
//! the dense grid synthesized from it has `2^r + 1`, with `r >= g`.

use std::path::Path;
use std::time::Instant;

use crate::error::{TerrainError, TerrainResult};
use crate::grid::side_for_exponent;

/// Largest accepted exponent. `(2^15 + 1)^2` vertices still fit `u32` indices.
pub const MAX_EXPONENT: u32 = 15;

/// Validated control grid, immutable after load.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlGrid {
    grid_size_exponent: u32,
    resolution_exponent: u32,
    heights: Vec<f32>,
}

impl ControlGrid {
    /// Builds a control grid from already-parsed values.
    ///
    /// # Errors
    ///
    /// Fails if either exponent exceeds [`MAX_EXPONENT`], if
    /// `resolution_exponent < grid_size_exponent`, if `heights` is shorter
    /// than `grid_size^2`, or if any elevation is not finite. Surplus heights
    /// are dropped.
    pub fn new(
        grid_size_exponent: u32,
        resolution_exponent: u32,
        mut heights: Vec<f32>,
    ) -> TerrainResult<Self> {
        let expected = control_point_count(grid_size_exponent, resolution_exponent)?;
        if heights.len() < expected {
            return Err(TerrainError::NotEnoughElevations {
                expected,
                found: heights.len(),
            });
        }
        if let Some(index) = heights[..expected].iter().position(|h| !h.is_finite()) {
            return Err(TerrainError::InvalidElevation {
                index,
                token: heights[index].to_string(),
            });
        }
        heights.truncate(expected);

        Ok(Self {
            grid_size_exponent,
            resolution_exponent,
            heights,
        })
    }

    /// Parses a heights description.
    ///
    /// # Errors
    ///
    /// Any missing or malformed token is an error; no partial grid is built.
    pub fn parse(text: &str) -> TerrainResult<Self> {
        let start = Instant::now();
        let mut tokens = text.split_whitespace();

        let grid_size_exponent = parse_exponent(tokens.next(), "grid size exponent")?;
        let resolution_exponent = parse_exponent(tokens.next(), "resolution exponent")?;
        let expected = control_point_count(grid_size_exponent, resolution_exponent)?;
        let side = side_for_exponent(grid_size_exponent);
        let mut heights = Vec::with_capacity(expected);
        for token in tokens.by_ref().take(expected) {
            let index = heights.len();
            let height = token
                .parse::<f32>()
                .ok()
                .filter(|h| h.is_finite())
                .ok_or_else(|| TerrainError::InvalidElevation {
                    index,
                    token: token.to_owned(),
                })?;
            heights.push(height);
        }
        if heights.len() < expected {
            return Err(TerrainError::NotEnoughElevations {
                expected,
                found: heights.len(),
            });
        }

        let surplus = tokens.count();
        if surplus > 0 {
            tracing::warn!("Ignoring {} elevations past the expected {}", surplus, expected);
        }

        tracing::debug!(
            "Parsed {}x{} control points in {:?}",
            side,
            side,
            start.elapsed()
        );

        Ok(Self {
            grid_size_exponent,
            resolution_exponent,
            heights,
        })
    }

    /// Reads and parses a heights file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or on any parse error.
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TerrainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::parse(&text)?;
        tracing::info!(
            "Loaded {}x{} control grid from {} (dense resolution {})",
            grid.grid_size(),
            grid.grid_size(),
            path.display(),
            grid.resolution()
        );
        Ok(grid)
    }

    /// Grid size exponent `g`.
    #[inline]
    #[must_use]
    pub const fn grid_size_exponent(&self) -> u32 {
        self.grid_size_exponent
    }

    /// Resolution exponent `r`.
    #[inline]
    #[must_use]
    pub const fn resolution_exponent(&self) -> u32 {
        self.resolution_exponent
    }

    /// Control points per side, `2^g + 1`.
    #[inline]
    #[must_use]
    pub const fn grid_size(&self) -> usize {
        side_for_exponent(self.grid_size_exponent)
    }

    /// Dense grid points per side, `2^r + 1`.
    #[inline]
    #[must_use]
    pub const fn resolution(&self) -> usize {
        side_for_exponent(self.resolution_exponent)
    }

    /// Dense cells between neighbouring control points, `2^(r-g)`.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        1 << (self.resolution_exponent - self.grid_size_exponent)
    }

    /// Row-major control elevations.
    #[inline]
    #[must_use]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Elevation at `(row, column)`, or `None` outside the grid.
    #[must_use]
    pub fn height(&self, row: usize, column: usize) -> Option<f32> {
        let side = self.grid_size();
        (row < side && column < side).then(|| self.heights[row * side + column])
    }

    /// Lowest and highest control elevation.
    #[must_use]
    pub fn elevation_range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// Validates a header and returns how many elevations it calls for.
fn control_point_count(grid_size_exponent: u32, resolution_exponent: u32) -> TerrainResult<usize> {
    check_exponent("grid size exponent", i64::from(grid_size_exponent))?;
    check_exponent("resolution exponent", i64::from(resolution_exponent))?;
    if resolution_exponent < grid_size_exponent {
        return Err(TerrainError::ResolutionBelowGrid {
            grid: grid_size_exponent,
            resolution: resolution_exponent,
        });
    }
    let side = side_for_exponent(grid_size_exponent);
    Ok(side * side)
}

fn parse_exponent(token: Option<&str>, field: &'static str) -> TerrainResult<u32> {
    let token = token.ok_or(TerrainError::MissingHeader(field))?;
    let value: i64 = token.parse().map_err(|_| TerrainError::InvalidExponent {
        field,
        token: token.to_owned(),
    })?;
    check_exponent(field, value)?;
    Ok(value as u32)
}

fn check_exponent(field: &'static str, value: i64) -> TerrainResult<()> {
    if value < 0 {
        return Err(TerrainError::NegativeExponent { field, value });
    }
    if value > i64::from(MAX_EXPONENT) {
        return Err(TerrainError::ExponentTooLarge {
            field,
            value,
            max: MAX_EXPONENT,
        });
    }
    Ok(())
}
