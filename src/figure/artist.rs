use crate::projection::dome::DomeGrid;
use crate::shading::color::Rgb8;
use crate::style::{StyleAttr, StyleKey, Stylable};
use std::sync::Arc;

/// Colormap applied to scalar images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colormap {
    /// Black-to-white ramp.
    Gray,
}

/// Pixel payload of an [`ImageArtist`].
#[derive(Clone, Debug, PartialEq)]
pub enum ImagePixels {
    /// Scalars mapped through `cmap` over the intensity range `clim`.
    Scalar {
        /// Row-major values; NaN cells are left blank.
        values: Vec<f64>,
        /// Intensity range mapped to the ends of the colormap.
        clim: (f64, f64),
        /// Colormap.
        cmap: Colormap,
    },
    /// Row-major unit-range RGB triples.
    Rgb(Vec<[f64; 3]>),
}

/// Cell image drawn over a `rows x cols` grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageArtist {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Cell payload.
    pub pixels: ImagePixels,
}

/// Marker drawn at each vertex of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    /// No markers.
    None,
    /// Small square dots.
    Point,
    /// Larger square markers.
    Circle,
}

/// Line appearance, parsed from a short format string such as `"r-"` or `"k."`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Rgb8,
    /// Draw connecting segments.
    pub connect: bool,
    /// Vertex marker.
    pub marker: Marker,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb8::BLUE,
            connect: true,
            marker: Marker::None,
        }
    }
}

impl LineStyle {
    /// Parse a format string. Unknown characters are ignored.
    pub fn from_fmt(fmt: &str) -> Self {
        let mut style = Self::default();
        let mut explicit_line = false;
        for ch in fmt.chars() {
            match ch {
                '-' => explicit_line = true,
                '.' => style.marker = Marker::Point,
                'o' => style.marker = Marker::Circle,
                c => {
                    if let Ok(color) = Rgb8::parse(&c.to_string()) {
                        style.color = color;
                    }
                }
            }
        }
        style.connect = explicit_line || style.marker == Marker::None;
        style
    }
}

/// Polyline in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LineArtist {
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Appearance.
    pub style: LineStyle,
}

/// Arrow field over a `rows x cols` grid (row 0 at the bottom).
#[derive(Clone, Debug, PartialEq)]
pub struct QuiverArtist {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Row-major x components.
    pub u: Vec<f64>,
    /// Row-major y components.
    pub v: Vec<f64>,
    /// Arrow color.
    pub color: Rgb8,
}

/// Vertical segments `(x, ymin, ymax)` in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct VLinesArtist {
    /// Segments in insertion order.
    pub segments: Vec<(f64, f64, f64)>,
    /// Segment color.
    pub color: Rgb8,
}

/// Unshaded surface over the shared dome grid with one RGBA face color per grid sample.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceArtist {
    /// Sample positions.
    pub grid: Arc<DomeGrid>,
    /// Row-major RGBA colors, one per grid sample.
    pub facecolors: Vec<[f32; 4]>,
}

/// A drawable owned by an axes slot; its data is mutated in place between frames.
#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    /// Cell image.
    Image(ImageArtist),
    /// Polyline.
    Line(LineArtist),
    /// Arrow field.
    Quiver(QuiverArtist),
    /// Vertical event marks.
    VLines(VLinesArtist),
    /// 3-D surface.
    Surface(SurfaceArtist),
}

impl Stylable for Artist {
    fn supports(&self, key: StyleKey) -> bool {
        matches!(
            (self, key),
            (
                Artist::Image(ImageArtist {
                    pixels: ImagePixels::Scalar { .. },
                    ..
                }),
                StyleKey::CLim
            ) | (Artist::Line(_), StyleKey::Color)
                | (Artist::Quiver(_), StyleKey::Color)
                | (Artist::VLines(_), StyleKey::Color)
        )
    }

    fn apply_style(&mut self, attr: &StyleAttr) {
        match (self, attr) {
            (
                Artist::Image(ImageArtist {
                    pixels: ImagePixels::Scalar { clim, .. },
                    ..
                }),
                StyleAttr::CLim(lo, hi),
            ) => *clim = (*lo, *hi),
            (Artist::Line(l), StyleAttr::Color(c)) => l.style.color = *c,
            (Artist::Quiver(q), StyleAttr::Color(c)) => q.color = *c,
            (Artist::VLines(v), StyleAttr::Color(c)) => v.color = *c,
            _ => {}
        }
    }
}
