use crate::foundation::math::linspace;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Co-latitude samples of the default grid.
pub const DOME_LAT_SAMPLES: usize = 60;
/// Longitude samples of the default grid.
pub const DOME_LONG_SAMPLES: usize = 60;

/// Map an angular position to a point on the unit sphere.
///
/// `lat` is the co-latitude measured from +z, `long` the azimuth measured from +x.
pub fn cartesian(lat: f64, long: f64) -> [f64; 3] {
    [long.cos() * lat.sin(), long.sin() * lat.sin(), lat.cos()]
}

/// Regular co-latitude x longitude sampling of the upper hemisphere.
///
/// Row `i` holds co-latitude `i` (0 at the pole, pi/2 at the rim), column `j` longitude `j`
/// over `[0, 2 pi]`; both ranges include their endpoints. Samples are stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DomeGrid {
    rows: usize,
    cols: usize,
    points: Vec<[f64; 3]>,
}

impl Default for DomeGrid {
    fn default() -> Self {
        Self::new(DOME_LAT_SAMPLES, DOME_LONG_SAMPLES)
    }
}

impl DomeGrid {
    /// Grid with `rows` co-latitude and `cols` longitude samples.
    pub fn new(rows: usize, cols: usize) -> Self {
        let lats = linspace(0.0, FRAC_PI_2, rows);
        let longs = linspace(0.0, TAU, cols);
        let points = lats
            .iter()
            .flat_map(|&lat| longs.iter().map(move |&long| cartesian(lat, long)))
            .collect();
        Self { rows, cols, points }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of samples.
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// Row-major sample points.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Sample at `(row, col)`.
    pub fn point(&self, row: usize, col: usize) -> Option<[f64; 3]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(row * self.cols + col).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/dome.rs"]
mod tests;
