//! Scalar-to-color mapping shared by image, hue-magnitude and dome panels.

/// Colors, HSV conversion and the vector-to-hue mapping.
pub mod color;
/// Range normalization.
pub mod norm;
