//! Row storage for grids whose point count varies per row.

/// Latitudes with per-row point counts and their prefix sum.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RaggedRows {
    latitudes: Vec<f64>,
    lon_points: Vec<usize>,
    /// `offsets[row]` is the index of the first point of `row`;
    /// `offsets[rows]` is the grid size.
    offsets: Vec<usize>,
}

impl RaggedRows {
    pub(crate) fn new(latitudes: Vec<f64>, lon_points: Vec<usize>) -> Self {
        debug_assert_eq!(latitudes.len(), lon_points.len());

        let mut offsets = Vec::with_capacity(lon_points.len() + 1);
        let mut total = 0;
        offsets.push(total);
        for count in &lon_points {
            total += count;
            offsets.push(total);
        }

        Self {
            latitudes,
            lon_points,
            offsets,
        }
    }

    pub(crate) fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub(crate) fn lon_points(&self) -> &[usize] {
        &self.lon_points
    }

    pub(crate) fn lon_points_at(&self, row: usize) -> usize {
        self.lon_points.get(row).copied().unwrap_or(0)
    }

    pub(crate) fn size(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    pub(crate) fn row_offset(&self, row: usize) -> usize {
        self.offsets[row.min(self.lon_points.len())]
    }

    pub(crate) fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.size() {
            return None;
        }
        let row = self.offsets.partition_point(|&offset| offset <= index) - 1;
        Some((row, index - self.offsets[row]))
    }

    /// Row whose latitude is closest to `lat`.
    pub(crate) fn row_nearest(&self, lat: f64) -> usize {
        self.latitudes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - lat).abs().total_cmp(&(*b - lat).abs()))
            .map(|(row, _)| row)
            .unwrap_or(0)
    }
}

/// Evenly spaced longitudes from 0° for a row of `count` points.
pub(crate) fn row_longitudes(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    (0..count).map(|col| col as f64 * step).collect()
}
