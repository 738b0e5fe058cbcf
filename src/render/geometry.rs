use crate::figure::{Artist, Axes, Figure, ImagePixels};
use crate::foundation::core::{Point, Rect};
use crate::shading::norm::Normalize;

/// Fraction of the figure height reserved along the bottom for the figure title.
const SUPTITLE_BAND: f64 = 0.06;
/// Inset of the plot area inside its grid cell, as fractions `(left, top, right, bottom)`.
const PLOT_INSET: (f64, f64, f64, f64) = (0.10, 0.10, 0.04, 0.10);

/// Pixel rectangle of the grid cell holding `slot`.
pub fn cell_rect(fig: &Figure, slot: usize, width: f64, height: f64) -> Rect {
    let (rows, cols) = fig.grid();
    let rows = rows.max(1);
    let cols = cols.max(1);
    let usable = if fig.suptitle.is_some() {
        height * (1.0 - SUPTITLE_BAND)
    } else {
        height
    };
    let cw = width / cols as f64;
    let ch = usable / rows as f64;
    let (r, c) = (slot / cols, slot % cols);
    Rect::new(
        c as f64 * cw,
        r as f64 * ch,
        (c + 1) as f64 * cw,
        (r + 1) as f64 * ch,
    )
}

/// Band along the bottom edge holding the figure title.
pub fn suptitle_rect(width: f64, height: f64) -> Rect {
    Rect::new(0.0, height * (1.0 - SUPTITLE_BAND), width, height)
}

/// Plot area inside a grid cell.
pub fn plot_rect(cell: Rect) -> Rect {
    let (l, t, r, b) = PLOT_INSET;
    let w = cell.width();
    let h = cell.height();
    Rect::new(
        cell.x0 + l * w,
        cell.y0 + t * h,
        cell.x1 - r * w,
        cell.y1 - b * h,
    )
}

/// Maps data coordinates (y up) onto a pixel rectangle (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataTransform {
    /// Data x range.
    pub xlim: (f64, f64),
    /// Data y range.
    pub ylim: (f64, f64),
    /// Target pixels.
    pub rect: Rect,
}

impl DataTransform {
    /// Transform from `xlim x ylim` onto `rect`.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64), rect: Rect) -> Self {
        Self { xlim, ylim, rect }
    }

    /// Pixel position of a data point.
    pub fn apply(&self, x: f64, y: f64) -> Point {
        let fx = unit(x, self.xlim);
        let fy = unit(y, self.ylim);
        Point::new(
            self.rect.x0 + fx * self.rect.width(),
            self.rect.y1 - fy * self.rect.height(),
        )
    }

    /// Clip the data segment `a-b` to the visible range.
    pub fn clip(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        clip_segment(a, b, self.xlim, self.ylim)
    }
}

fn unit(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span == 0.0 { 0.5 } else { (v - lo) / span }
}

/// Liang-Barsky clipping of segment `a-b` against the box `xlim x ylim`.
///
/// Limits may be given in either order. Non-finite endpoints yield `None`.
pub fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    xlim: (f64, f64),
    ylim: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (xmin, xmax) = (xlim.0.min(xlim.1), xlim.0.max(xlim.1));
    let (ymin, ymax) = (ylim.0.min(ylim.1), ylim.0.max(ylim.1));
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, a.0 - xmin),
        (dx, xmax - a.0),
        (-dy, a.1 - ymin),
        (dy, ymax - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Data limits of a flat axes: the decor limits, else the extent of its line-like artists.
///
/// Empty or degenerate extents are widened so the transform stays invertible.
pub fn data_limits(axes: &Axes) -> ((f64, f64), (f64, f64)) {
    let mut xs = Extent::default();
    let mut ys = Extent::default();
    for artist in &axes.artists {
        match artist {
            Artist::Line(l) => {
                l.x.iter().for_each(|&v| xs.add(v));
                l.y.iter().for_each(|&v| ys.add(v));
            }
            Artist::VLines(v) => {
                for &(x, y0, y1) in &v.segments {
                    xs.add(x);
                    ys.add(y0);
                    ys.add(y1);
                }
            }
            Artist::Quiver(q) => {
                xs.add(-0.5);
                xs.add(q.cols as f64 - 0.5);
                ys.add(-0.5);
                ys.add(q.rows as f64 - 0.5);
            }
            Artist::Image(_) | Artist::Surface(_) => {}
        }
    }
    (
        axes.decor.xlim.unwrap_or_else(|| xs.range()),
        axes.decor.ylim.unwrap_or_else(|| ys.range()),
    )
}

#[derive(Default)]
struct Extent(Option<(f64, f64)>);

impl Extent {
    fn add(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        self.0 = Some(match self.0 {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }

    fn range(&self) -> (f64, f64) {
        match self.0 {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(r) => r,
        }
    }
}

/// Pixel rectangle of image cell `(row, col)`; row 0 is drawn at the top.
pub fn image_cell(rect: Rect, rows: usize, cols: usize, row: usize, col: usize) -> Rect {
    let cw = rect.width() / cols.max(1) as f64;
    let ch = rect.height() / rows.max(1) as f64;
    Rect::new(
        rect.x0 + col as f64 * cw,
        rect.y0 + row as f64 * ch,
        rect.x0 + (col + 1) as f64 * cw,
        rect.y0 + (row + 1) as f64 * ch,
    )
}

/// Unit-range RGB of image cell `i`, or `None` for blank (NaN) cells.
pub fn image_cell_rgb(pixels: &ImagePixels, i: usize) -> Option<[f64; 3]> {
    match pixels {
        ImagePixels::Scalar { values, clim, .. } => {
            let v = *values.get(i)?;
            if v.is_nan() {
                return None;
            }
            let g = Normalize::clipped(clim.0, clim.1).apply(v);
            Some([g, g, g])
        }
        ImagePixels::Rgb(rgb) => {
            let c = *rgb.get(i)?;
            c.iter().all(|v| !v.is_nan()).then_some(c)
        }
    }
}

/// Orthographic camera for 3-D axes, parameterized like a turntable view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoCamera {
    /// Elevation above the xy-plane, degrees.
    pub elev_deg: f64,
    /// Azimuth around z, degrees.
    pub azim_deg: f64,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            elev_deg: 30.0,
            azim_deg: -60.0,
        }
    }
}

impl OrthoCamera {
    /// Screen coordinates (x right, y up) and depth (larger is closer to the viewer).
    pub fn project(&self, p: [f64; 3]) -> (f64, f64, f64) {
        let (se, ce) = self.elev_deg.to_radians().sin_cos();
        let (sa, ca) = self.azim_deg.to_radians().sin_cos();
        let right = [-sa, ca, 0.0];
        let up = [-se * ca, -se * sa, ce];
        let eye = [ce * ca, ce * sa, se];
        let dot = |a: [f64; 3]| a[0] * p[0] + a[1] * p[1] + a[2] * p[2];
        (dot(right), dot(up), dot(eye))
    }
}

/// Square region centered in `rect` used for 3-D content, with `pad` relative margin.
pub fn square_viewport(rect: Rect, pad: f64) -> Rect {
    let side = rect.width().min(rect.height()) * (1.0 - 2.0 * pad);
    let c = rect.center();
    Rect::new(
        c.x - side / 2.0,
        c.y - side / 2.0,
        c.x + side / 2.0,
        c.y + side / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
