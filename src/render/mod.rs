//! Rasterization of the figure model.

/// Frame type and the renderer trait.
pub mod backend;
/// CPU renderer powered by `vello_cpu`.
pub mod cpu;
/// Pixel-space layout of panels, data transforms and the dome camera.
pub mod geometry;
/// Label shaping with `parley`.
pub mod text;
