use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::projection::dome::DomeGrid;
use crate::shading::norm::Normalize;

/// For every dome sample, the index of the closest node position.
///
/// Built once per panel; every frame then reduces to a gather. Ties go to the lowest node index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NearestBasis {
    node_count: usize,
    nearest: Vec<usize>,
}

impl NearestBasis {
    /// Precompute nearest nodes for every sample of `grid`.
    pub fn build(grid: &DomeGrid, nodes: &[[f64; 3]]) -> LpuvisResult<Self> {
        if nodes.is_empty() {
            return Err(LpuvisError::validation(
                "dome projection needs at least one node position",
            ));
        }
        let nearest = grid
            .points()
            .iter()
            .map(|p| {
                let mut best = 0;
                let mut best_d = f64::INFINITY;
                for (i, n) in nodes.iter().enumerate() {
                    let d = dist2(p, n);
                    if d < best_d {
                        best_d = d;
                        best = i;
                    }
                }
                best
            })
            .collect();
        Ok(Self {
            node_count: nodes.len(),
            nearest,
        })
    }

    /// Number of node positions the basis was built from.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Node index per sample.
    pub fn indices(&self) -> &[usize] {
        &self.nearest
    }

    /// Spread per-node `values` over the grid samples.
    pub fn interpolate(&self, values: &[f64]) -> LpuvisResult<Vec<f64>> {
        if values.len() != self.node_count {
            return Err(LpuvisError::validation(format!(
                "dome projection got {} values for {} nodes",
                values.len(),
                self.node_count
            )));
        }
        Ok(self.nearest.iter().map(|&i| values[i]).collect())
    }
}

fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Normalize interpolated samples and tile them into opaque gray RGBA face colors.
///
/// NaN samples map to black.
pub fn shade_rgba(samples: &[f64], norm: &Normalize) -> Vec<[f32; 4]> {
    samples
        .iter()
        .map(|&v| {
            let n = norm.apply(v);
            let g = if n.is_nan() { 0.0 } else { n as f32 };
            [g, g, g, 1.0]
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/projection/nearest.rs"]
mod tests;
