//! # Toroidal Grid Addressing
//!
//! Every grid in this crate is a flat row-major `Vec`. Reads that step past an
//! edge land on the opposite edge, as if the grid were wrapped onto a torus.

/// Converts `(row, column)` into a linear index of a `width x height` grid,
/// wrapping out-of-range coordinates from the opposite edge.
///
/// Negative coordinates wrap from the far edge (`-1` is the last row), and
/// coordinates past the end wrap to the start.
///
/// # Panics
///
/// Panics if `width` or `height` is zero. In debug builds, also asserts that
/// the result lies inside the grid.
#[inline]
#[must_use]
pub fn toroidal_index(row: isize, column: isize, width: usize, height: usize) -> usize {
    let row = row.rem_euclid(height as isize) as usize;
    let column = column.rem_euclid(width as isize) as usize;
    let index = row * width + column;
    debug_assert!(index < width * height, "grid index {index} out of bounds");
    index
}

/// Side length of a square grid with `2^exponent + 1` points per side.
#[inline]
#[must_use]
pub const fn side_for_exponent(exponent: u32) -> usize {
    (1usize << exponent) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_row_major() {
        assert_eq!(toroidal_index(0, 0, 5, 3), 0);
        assert_eq!(toroidal_index(1, 2, 5, 3), 7);
        assert_eq!(toroidal_index(2, 4, 5, 3), 14);
    }

    #[test]
    fn test_wraps_rows() {
        let height = 4;
        assert_eq!(toroidal_index(-1, 2, 6, height), toroidal_index(3, 2, 6, height));
        assert_eq!(toroidal_index(4, 2, 6, height), toroidal_index(0, 2, 6, height));
    }

    #[test]
    fn test_wraps_columns() {
        assert_eq!(toroidal_index(1, -1, 6, 4), toroidal_index(1, 5, 6, 4));
        assert_eq!(toroidal_index(1, 6, 6, 4), toroidal_index(1, 0, 6, 4));
    }

    #[test]
    fn test_wraps_more_than_one_lap() {
        // Truncating modulo would give a negative remainder here
        assert_eq!(toroidal_index(-7, -13, 5, 3), toroidal_index(2, 2, 5, 3));
        assert_eq!(toroidal_index(9, 11, 5, 3), toroidal_index(0, 1, 5, 3));
    }

    #[test]
    fn test_side_for_exponent() {
        assert_eq!(side_for_exponent(0), 2);
        assert_eq!(side_for_exponent(1), 3);
        assert_eq!(side_for_exponent(7), 129);
    }
}
