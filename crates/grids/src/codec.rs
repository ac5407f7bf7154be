//! Mapping between (row, column) grid coordinates and linear indices.
//!
//! Encoding applies, in order: the i-direction flip, the j-direction flip,
//! the opposite-rows reversal on odd storage lines, then the row- or
//! column-major offset. Decoding undoes the same steps in reverse, so for
//! any fixed scan mode the codec is a bijection between valid coordinates
//! and `0..size`.
//!
//! Column-major order needs a rectangular grid; ragged grids have no
//! column-major index.

use crate::layout::{GeoPoint, Grid};
use crate::scan_mode::ScanMode;

/// Linear index of (`row`, `col`) under `mode`, or `None` if the pair is
/// not a point of the grid.
pub fn grid_index_from_indices<G: Grid + ?Sized>(
    grid: &G,
    row: usize,
    col: usize,
    mode: ScanMode,
) -> Option<usize> {
    let rows = grid.rows();
    if row >= rows {
        return None;
    }
    let count = grid.lon_points_at(row);
    if col >= count {
        return None;
    }

    let col = if mode.is_negative_i() { count - 1 - col } else { col };
    let row = if mode.is_positive_j() { rows - 1 - row } else { row };

    if mode.is_consecutive_j() {
        if !grid.is_rectangular() {
            return None;
        }
        let row = if mode.is_opposite_rows() && col % 2 == 1 {
            rows - 1 - row
        } else {
            row
        };
        Some(col * rows + row)
    } else {
        let stored = grid.lon_points_at(row);
        if col >= stored {
            return None;
        }
        let col = if mode.is_opposite_rows() && row % 2 == 1 {
            stored - 1 - col
        } else {
            col
        };
        Some(grid.row_offset(row) + col)
    }
}

/// (row, column) of a linear index under `mode`.
pub fn grid_indices<G: Grid + ?Sized>(
    grid: &G,
    index: usize,
    mode: ScanMode,
) -> Option<(usize, usize)> {
    if index >= grid.size() {
        return None;
    }
    let rows = grid.rows();

    let (row, col) = if mode.is_consecutive_j() {
        if !grid.is_rectangular() || rows == 0 {
            return None;
        }
        let (row, col) = (index % rows, index / rows);
        if mode.is_opposite_rows() && col % 2 == 1 {
            (rows - 1 - row, col)
        } else {
            (row, col)
        }
    } else {
        let (row, col) = grid.locate(index)?;
        if mode.is_opposite_rows() && row % 2 == 1 {
            (row, grid.lon_points_at(row) - 1 - col)
        } else {
            (row, col)
        }
    };

    let row = if mode.is_positive_j() { rows - 1 - row } else { row };
    let count = grid.lon_points_at(row);
    if col >= count {
        return None;
    }
    let col = if mode.is_negative_i() { count - 1 - col } else { col };

    Some((row, col))
}

/// Coordinates of the point stored at `index`.
pub fn grid_point<G: Grid + ?Sized>(grid: &G, index: usize, mode: ScanMode) -> Option<GeoPoint> {
    let (row, col) = grid_indices(grid, index, mode)?;
    Some(GeoPoint::new(grid.latitudes()[row], grid.longitude_at(row, col)))
}

/// Linear index of the point nearest to (`lat`, `lon`).
pub fn grid_index<G: Grid + ?Sized>(grid: &G, lat: f64, lon: f64, mode: ScanMode) -> Option<usize> {
    let (row, col) = grid.nearest_index(lat, lon);
    grid_index_from_indices(grid, row, col, mode)
}

/// Linear index of the degree-nearest point, without geodesic refinement.
pub fn guess_grid_index<G: Grid + ?Sized>(
    grid: &G,
    lat: f64,
    lon: f64,
    mode: ScanMode,
) -> Option<usize> {
    let (row, col) = grid.guess_nearest_index(lat, lon);
    grid_index_from_indices(grid, row, col, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LatLonGrid, OctahedralGaussian, ReducedGaussian};
    use std::collections::HashSet;
    use test_utils::grid;

    fn small() -> LatLonGrid {
        // 3 rows (10, 5, 0) x 4 columns (0, 10, 20, 30)
        let (min_lat, max_lat, min_lon, max_lon, lat_step, lon_step) = grid::TINY;
        LatLonGrid::new(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step).unwrap()
    }

    fn mode(bits: u8) -> ScanMode {
        ScanMode::from_bits(bits)
    }

    #[test]
    fn test_standard_row_major() {
        let grid = small();
        assert_eq!(grid_index_from_indices(&grid, 0, 0, mode(0)), Some(0));
        assert_eq!(grid_index_from_indices(&grid, 1, 2, mode(0)), Some(6));
        assert_eq!(grid_index_from_indices(&grid, 2, 3, mode(0)), Some(11));
    }

    #[test]
    fn test_flipped_directions() {
        let grid = small();
        // -i: first stored point is the east end of row 0
        assert_eq!(grid_index_from_indices(&grid, 0, 3, mode(1)), Some(0));
        // +j: first stored row is the southern one
        assert_eq!(grid_index_from_indices(&grid, 2, 0, mode(2)), Some(0));
        assert_eq!(grid_index_from_indices(&grid, 0, 0, mode(2)), Some(8));
    }

    #[test]
    fn test_column_major() {
        let grid = small();
        assert_eq!(grid_index_from_indices(&grid, 1, 0, mode(4)), Some(1));
        assert_eq!(grid_index_from_indices(&grid, 0, 1, mode(4)), Some(3));
        assert_eq!(grid_index_from_indices(&grid, 2, 3, mode(4)), Some(11));
    }

    #[test]
    fn test_opposite_rows() {
        let grid = small();
        // Row 1 runs east to west
        assert_eq!(grid_index_from_indices(&grid, 1, 0, mode(8)), Some(7));
        assert_eq!(grid_index_from_indices(&grid, 1, 3, mode(8)), Some(4));
        assert_eq!(grid_index_from_indices(&grid, 2, 0, mode(8)), Some(8));

        // Column-major: column 1 runs south to north
        assert_eq!(grid_index_from_indices(&grid, 0, 1, mode(4 | 8)), Some(5));
        assert_eq!(grid_index_from_indices(&grid, 2, 1, mode(4 | 8)), Some(3));
    }

    #[test]
    fn test_invalid_coordinates() {
        let grid = small();
        for m in ScanMode::codec_combinations() {
            assert_eq!(grid_index_from_indices(&grid, 3, 0, m), None);
            assert_eq!(grid_index_from_indices(&grid, 0, 4, m), None);
            assert_eq!(grid_indices(&grid, 12, m), None);
            assert_eq!(grid_point(&grid, 12, m), None);
        }
    }

    #[test]
    fn test_offset_flags_do_not_move_points() {
        let grid = small();
        let plain = grid_index_from_indices(&grid, 1, 2, mode(0));
        let flagged = mode(ScanMode::ODD_ROWS_OFFSET | ScanMode::J_OFFSET | ScanMode::REDUCED_POINTS);
        assert_eq!(grid_index_from_indices(&grid, 1, 2, flagged), plain);
    }

    #[test]
    fn test_rectangular_bijection_all_modes() {
        let grid = small();
        for m in ScanMode::codec_combinations() {
            let mut seen = HashSet::new();
            for row in 0..grid.rows() {
                for col in 0..4 {
                    let index = grid_index_from_indices(&grid, row, col, m).unwrap();
                    assert!(index < grid.size(), "mode {m}");
                    assert!(seen.insert(index), "mode {m} repeats {index}");
                    assert_eq!(grid_indices(&grid, index, m), Some((row, col)), "mode {m}");
                }
            }
            assert_eq!(seen.len(), grid.size());
        }
    }

    #[test]
    fn test_grid_point_round_trip() {
        let grid = small();
        for m in ScanMode::codec_combinations() {
            for row in 0..grid.rows() {
                for col in 0..4 {
                    let index = grid_index_from_indices(&grid, row, col, m).unwrap();
                    let point = grid_point(&grid, index, m).unwrap();
                    assert_eq!(point.lat, grid.latitudes()[row]);
                    assert_eq!(point.lon, grid.longitude_at(row, col));
                }
            }
        }
    }

    #[test]
    fn test_ragged_row_major_bijection() {
        let grid = OctahedralGaussian::new(8).unwrap();
        let row_major = ScanMode::codec_combinations().filter(|m| !m.is_consecutive_j());

        for m in row_major {
            let mut seen = HashSet::new();
            for row in 0..grid.rows() {
                for col in 0..grid.lon_points_at(row) {
                    let index = grid_index_from_indices(&grid, row, col, m).unwrap();
                    assert!(seen.insert(index), "mode {m}");
                    assert_eq!(grid_indices(&grid, index, m), Some((row, col)), "mode {m}");
                }
            }
            assert_eq!(seen.len(), grid.size(), "mode {m}");
        }
    }

    #[test]
    fn test_ragged_column_major_is_invalid() {
        let grid = ReducedGaussian::new(8).unwrap();
        assert_eq!(grid_index_from_indices(&grid, 0, 0, mode(4)), None);
        assert_eq!(grid_indices(&grid, 0, mode(4)), None);
    }

    #[test]
    fn test_grid_index_nearest() {
        let grid = small();
        assert_eq!(grid_index(&grid, 4.0, 12.0, mode(0)), Some(5));
        assert_eq!(guess_grid_index(&grid, 4.0, 12.0, mode(0)), Some(5));
        assert_eq!(grid_index(&grid, 4.0, 12.0, mode(2)), Some(5));
        assert_eq!(grid_index(&grid, 9.0, 1.0, mode(2)), Some(8));
    }
}
