//! # Diamond-Square Synthesis
//!
//! Expands a [`ControlGrid`] into a dense [`Heightfield`] by recursive
//! midpoint displacement.
//!
//! ## Algorithm
//!
//! 1. Copy every control point into the dense grid at stride
//!    `s = (resolution - 1) / (grid_size - 1)`.
//! 2. While `s > 1`:
//!    - **Square**: each cell centred between four known corners gets their
//!      average plus noise. Corners are read with toroidal wraparound.
//!    - **Diamond**: each remaining edge midpoint gets the average of the
//!      up/right/down/left neighbours that exist inside the grid, plus noise.
//!      No wraparound here: boundary cells average only two or three values.
//!    - Halve `s` and scale the noise amplitude by `2^-h`.
//!
//! Control points are never written after step 1.

use std::time::Instant;

use crate::control::ControlGrid;
use crate::grid::toroidal_index;
use crate::noise::NoiseSource;

/// Tuning for midpoint displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisParams {
    /// Roughness exponent `h`. Higher is smoother; typically in `[0, 1]`.
    pub roughness: f32,
    /// Base noise amplitude (standard deviation) before decay.
    pub max_random_height: f32,
}

impl SynthesisParams {
    /// Creates new parameters.
    #[must_use]
    pub const fn new(roughness: f32, max_random_height: f32) -> Self {
        Self {
            roughness,
            max_random_height,
        }
    }

    /// Parameters that reproduce pure interpolation of the control grid.
    #[must_use]
    pub const fn noiseless() -> Self {
        Self::new(0.5, 0.0)
    }

    /// Per-level amplitude decay, `2^-h`.
    #[inline]
    #[must_use]
    pub fn smoothing_factor(&self) -> f32 {
        (-self.roughness).exp2()
    }

    /// Noise amplitude used while refining at `level` (the first level is 1).
    #[must_use]
    pub fn amplitude_at(&self, level: u32) -> f32 {
        let smoothing = self.smoothing_factor();
        (0..level).fold(self.max_random_height, |amp, _| amp * smoothing)
    }
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self::new(0.5, 1.0)
    }
}

/// Dense square elevation grid.
///
/// Owns its samples exclusively and is read-only once synthesis returns.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    size: usize,
    heights: Vec<f32>,
    max_height: f32,
}

impl Heightfield {
    /// Points per side.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major elevations.
    #[inline]
    #[must_use]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Elevation at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the grid.
    #[inline]
    #[must_use]
    pub fn height(&self, row: usize, column: usize) -> f32 {
        assert!(row < self.size && column < self.size, "({row}, {column}) outside grid");
        self.heights[row * self.size + column]
    }

    /// Highest elevation anywhere in the grid.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Reads with toroidal wraparound.
    #[inline]
    fn wrapped(&self, row: isize, column: isize) -> f32 {
        self.heights[toroidal_index(row, column, self.size, self.size)]
    }

    /// Writes a generated sample and folds it into the running maximum.
    #[inline]
    fn store(&mut self, row: usize, column: usize, height: f32) {
        self.heights[row * self.size + column] = height;
        self.max_height = self.max_height.max(height);
    }
}

/// Synthesizes a dense heightfield from `control` at its target resolution.
///
/// Noise is drawn from `noise` once per generated cell: the whole square pass
/// of a level first, then its diamond pass, each in row-major order.
#[must_use]
pub fn diamond_square<N: NoiseSource>(
    control: &ControlGrid,
    params: &SynthesisParams,
    mut noise: N,
) -> Heightfield {
    let start = Instant::now();
    let mut field = overlay_control_points(control);
    tracing::debug!("Completed setting initial points in {:?}", start.elapsed());

    if field.size == control.grid_size() {
        return field;
    }

    let refine_start = Instant::now();
    let smoothing = params.smoothing_factor();
    let mut amplitude = params.max_random_height * smoothing;
    let mut stride = control.stride();
    let mut level = 1u32;

    while stride > 1 {
        square_pass(&mut field, stride, amplitude, &mut noise);
        diamond_pass(&mut field, stride, amplitude, &mut noise);

        tracing::trace!("Refined level {} (stride {}, amplitude {})", level, stride, amplitude);
        stride /= 2;
        amplitude *= smoothing;
        level += 1;
    }

    tracing::debug!(
        "Completed diamond-square on {}x{} in {:?}",
        field.size,
        field.size,
        refine_start.elapsed()
    );
    field
}

/// Places every control point at its strided dense position.
///
/// Cells between control points are left as NaN until refinement fills them.
fn overlay_control_points(control: &ControlGrid) -> Heightfield {
    let size = control.resolution();
    let grid_size = control.grid_size();
    let stride = control.stride();

    let mut field = Heightfield {
        size,
        heights: vec![f32::NAN; size * size],
        max_height: f32::NEG_INFINITY,
    };

    for row in (0..size).step_by(stride) {
        for column in (0..size).step_by(stride) {
            let source = toroidal_index(
                (row / stride) as isize,
                (column / stride) as isize,
                grid_size,
                grid_size,
            );
            field.store(row, column, control.heights()[source]);
        }
    }
    field
}

fn square_pass<N: NoiseSource>(field: &mut Heightfield, stride: usize, amplitude: f32, noise: &mut N) {
    let half = stride / 2;
    let offset = half as isize;

    for row in (half..field.size).step_by(stride) {
        for column in (half..field.size).step_by(stride) {
            let (r, c) = (row as isize, column as isize);
            let top_left = field.wrapped(r - offset, c - offset);
            let top_right = field.wrapped(r - offset, c + offset);
            let bottom_right = field.wrapped(r + offset, c + offset);
            let bottom_left = field.wrapped(r + offset, c - offset);

            let average = (top_left + top_right + bottom_right + bottom_left) / 4.0;
            field.store(row, column, average + noise.offset(amplitude));
        }
    }
}

fn diamond_pass<N: NoiseSource>(field: &mut Heightfield, stride: usize, amplitude: f32, noise: &mut N) {
    let half = stride / 2;
    let last = field.size - 1;

    for row in (0..field.size).step_by(half) {
        // Rows on the coarse lattice start half a stride in; rows between start at 0
        let first_column = ((row / half + 1) % 2) * half;
        for column in (first_column..field.size).step_by(stride) {
            let mut sum = 0.0;
            let mut count = 0u8;

            if row > 0 {
                sum += field.height(row - half, column);
                count += 1;
            }
            if column < last {
                sum += field.height(row, column + half);
                count += 1;
            }
            if row < last {
                sum += field.height(row + half, column);
                count += 1;
            }
            if column > 0 {
                sum += field.height(row, column - half);
                count += 1;
            }

            let average = sum / f32::from(count);
            field.store(row, column, average + noise.offset(amplitude));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ScriptedNoise;

    fn flat(g: u32, r: u32, value: f32) -> ControlGrid {
        let side = crate::grid::side_for_exponent(g);
        ControlGrid::new(g, r, vec![value; side * side]).unwrap()
    }

    #[test]
    fn test_amplitude_schedule() {
        let params = SynthesisParams::new(1.0, 8.0);
        assert_eq!(params.smoothing_factor(), 0.5);
        assert_eq!(params.amplitude_at(0), 8.0);
        assert_eq!(params.amplitude_at(1), 4.0);
        assert_eq!(params.amplitude_at(3), 1.0);
    }

    #[test]
    fn test_no_refinement_copies_control_grid() {
        let control = ControlGrid::new(1, 1, (0..9).map(|i| i as f32).collect()).unwrap();
        let mut noise = ScriptedNoise::new(vec![1.0]);
        let field = diamond_square(&control, &SynthesisParams::default(), &mut noise);

        assert_eq!(field.heights(), control.heights());
        assert_eq!(field.max_height(), 8.0);
        assert_eq!(noise.drawn(), 0);
    }

    #[test]
    fn test_every_cell_assigned() {
        let control = flat(1, 5, 2.0);
        let field = diamond_square(&control, &SynthesisParams::noiseless(), ScriptedNoise::default());
        assert!(field.heights().iter().all(|h| !h.is_nan()));
        assert!(field.heights().iter().all(|&h| h == 2.0));
    }

    #[test]
    fn test_one_sample_per_generated_cell() {
        let control = flat(1, 3, 0.0);
        let mut noise = ScriptedNoise::new(vec![0.0]);
        let _ = diamond_square(&control, &SynthesisParams::default(), &mut noise);
        // 81 cells minus 9 control points
        assert_eq!(noise.drawn(), 81 - 9);
    }

    #[test]
    fn test_square_pass_uses_corner_average() {
        // 2x2 control grid refined to 3x3: centre is the corner mean plus noise
        let control = ControlGrid::new(0, 1, vec![0.0, 4.0, 8.0, 12.0]).unwrap();
        let params = SynthesisParams::new(1.0, 2.0);
        // First draw feeds the square pass; amplitude at level 1 is 2 * 0.5 = 1
        let field = diamond_square(&control, &params, ScriptedNoise::new(vec![0.5, 0.0]));
        assert_eq!(field.height(1, 1), 6.0 + 0.5);
    }

    #[test]
    fn test_diamond_pass_clamps_at_edges() {
        let control = ControlGrid::new(0, 1, vec![0.0, 4.0, 8.0, 12.0]).unwrap();
        let field = diamond_square(&control, &SynthesisParams::noiseless(), ScriptedNoise::default());
        let centre = 6.0;
        // Top edge: left, right, and centre below (no wrap to the bottom row)
        assert_eq!(field.height(0, 1), (4.0 + centre + 0.0) / 3.0);
        // Left edge: top, centre to the right, bottom
        assert_eq!(field.height(1, 0), (0.0 + centre + 8.0) / 3.0);
        assert_eq!(field.height(1, 2), (4.0 + 12.0 + centre) / 3.0);
        assert_eq!(field.height(2, 1), (centre + 12.0 + 8.0) / 3.0);
    }

    #[test]
    fn test_max_height_counts_control_points() {
        let control = ControlGrid::new(0, 2, vec![-5.0, -3.0, -4.0, -1.0]).unwrap();
        let field = diamond_square(&control, &SynthesisParams::noiseless(), ScriptedNoise::default());
        assert_eq!(field.max_height(), -1.0);
    }
}
