//! Panel grid computation and slot allocation.

use crate::figure::Figure;
use crate::foundation::math::{ceil_div, ceil_sqrt};

/// Grid dimensions `(rows, cols)` for `n` panels.
///
/// An explicit `rows x cols` is honored only when it holds exactly `n` panels; otherwise
/// `cols = ceil(sqrt(n))` and `rows = ceil(n / cols)`.
pub fn grid_dims(n: usize, rows: usize, cols: usize) -> (usize, usize) {
    if rows * cols == n && n > 0 {
        return (rows, cols);
    }
    let cols = ceil_sqrt(n).max(1);
    (ceil_div(n, cols).max(1), cols)
}

/// Allocate a figure with one slot per panel in row-major order.
///
/// Slots past `n` are removed.
pub fn allocate(
    n: usize,
    rows: usize,
    cols: usize,
    figsize: (f64, f64),
    fontsize: f64,
) -> Figure {
    let (rows, cols) = grid_dims(n, rows, cols);
    let mut fig = Figure::subplots(rows, cols, figsize, fontsize);
    fig.delete_axes_from(n);
    tracing::debug!(panels = n, rows, cols, "allocated panel grid");
    fig
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
