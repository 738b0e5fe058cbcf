//! Spherical projection for dome panels.

/// Fixed hemisphere sample grid.
pub mod dome;
/// Nearest-neighbour interpolation onto the dome grid.
pub mod nearest;
