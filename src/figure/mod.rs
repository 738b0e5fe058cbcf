//! Retained drawing model.
//!
//! A [`Figure`] owns a grid of [`Axes`], each holding the [`Artist`]s of one panel. Plot handlers
//! mutate artists in place between frames; a [`crate::render::backend::FigureRenderer`] turns
//! the model into pixels.

/// Drawables owned by an axes slot.
pub mod artist;

pub use artist::{
    Artist, Colormap, ImageArtist, ImagePixels, LineArtist, LineStyle, Marker, QuiverArtist,
    SurfaceArtist, VLinesArtist,
};

use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::style::{StyleAttr, StyleKey, Stylable};

/// Text with a font size (points) and weight.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text.
    pub text: String,
    /// Font size in points.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
}

impl TextLabel {
    /// Bold label at `size` points.
    pub fn bold(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            bold: true,
        }
    }
}

/// Coordinate system of an axes slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxesProjection {
    /// 2-D data coordinates.
    Flat,
    /// 3-D view used by dome surfaces.
    ThreeD,
}

/// Labels, limits and tick visibility of an axes slot.
#[derive(Clone, Debug, PartialEq)]
pub struct AxesDecor {
    /// Panel title.
    pub title: Option<TextLabel>,
    /// X-axis label.
    pub xlabel: Option<TextLabel>,
    /// Y-axis label.
    pub ylabel: Option<TextLabel>,
    /// Fixed x limits; `None` autoscales to the data.
    pub xlim: Option<(f64, f64)>,
    /// Fixed y limits; `None` autoscales to the data.
    pub ylim: Option<(f64, f64)>,
    /// Show x ticks.
    pub xticks: bool,
    /// Show y ticks.
    pub yticks: bool,
    /// Show z ticks (3-D only).
    pub zticks: bool,
}

impl Default for AxesDecor {
    fn default() -> Self {
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
            xticks: true,
            yticks: true,
            zticks: true,
        }
    }
}

impl AxesDecor {
    /// Hide every tick.
    pub fn hide_ticks(&mut self) {
        self.xticks = false;
        self.yticks = false;
        self.zticks = false;
    }
}

impl Stylable for AxesDecor {
    fn supports(&self, key: StyleKey) -> bool {
        matches!(
            key,
            StyleKey::Title | StyleKey::XLabel | StyleKey::YLabel | StyleKey::XLim | StyleKey::YLim
        )
    }

    fn apply_style(&mut self, attr: &StyleAttr) {
        match attr {
            StyleAttr::Title(l) => self.title = Some(l.clone()),
            StyleAttr::XLabel(l) => self.xlabel = Some(l.clone()),
            StyleAttr::YLabel(l) => self.ylabel = Some(l.clone()),
            StyleAttr::XLim(lo, hi) => self.xlim = Some((*lo, *hi)),
            StyleAttr::YLim(lo, hi) => self.ylim = Some((*lo, *hi)),
            StyleAttr::CLim(..) | StyleAttr::Color(_) => {}
        }
    }
}

/// One grid slot of a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    /// Row-major slot index within the figure grid.
    pub slot: usize,
    /// Coordinate system.
    pub projection: AxesProjection,
    /// Labels, limits and ticks.
    pub decor: AxesDecor,
    /// Drawables; the first one is the panel's primary handle.
    pub artists: Vec<Artist>,
}

impl Axes {
    fn new(slot: usize, projection: AxesProjection) -> Self {
        Self {
            slot,
            projection,
            decor: AxesDecor::default(),
            artists: Vec::new(),
        }
    }

    /// Add an artist and return its index.
    pub fn push(&mut self, artist: Artist) -> usize {
        self.artists.push(artist);
        self.artists.len() - 1
    }

    /// Remove every artist and reset the decor, keeping the projection.
    pub fn clear(&mut self) {
        self.artists.clear();
        self.decor = AxesDecor::default();
    }

    /// Mutable access to artist `i`.
    pub fn artist_mut(&mut self, i: usize) -> LpuvisResult<&mut Artist> {
        let slot = self.slot;
        self.artists.get_mut(i).ok_or_else(|| {
            LpuvisError::render(format!("axes slot {slot} has no artist {i}"))
        })
    }
}

/// Figure: a `rows x cols` grid of axes plus an optional figure-level title.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Physical size in inches `(width, height)`.
    pub size_in: (f64, f64),
    /// Base font size in points.
    pub fontsize: f64,
    /// Figure-level title drawn along the bottom edge.
    pub suptitle: Option<TextLabel>,
    rows: usize,
    cols: usize,
    axes: Vec<Axes>,
}

impl Figure {
    /// Allocate a `rows x cols` grid of flat axes.
    pub fn subplots(rows: usize, cols: usize, size_in: (f64, f64), fontsize: f64) -> Self {
        Self {
            size_in,
            fontsize,
            suptitle: None,
            rows,
            cols,
            axes: (0..rows * cols)
                .map(|slot| Axes::new(slot, AxesProjection::Flat))
                .collect(),
        }
    }

    /// Grid dimensions `(rows, cols)`.
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Remaining axes in slot order.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Remove every slot from `first` onwards.
    pub fn delete_axes_from(&mut self, first: usize) {
        self.axes.retain(|a| a.slot < first);
    }

    /// Axes at `slot`.
    pub fn axes_at(&self, slot: usize) -> LpuvisResult<&Axes> {
        self.axes
            .iter()
            .find(|a| a.slot == slot)
            .ok_or_else(|| LpuvisError::render(format!("figure has no axes in slot {slot}")))
    }

    /// Mutable axes at `slot`.
    pub fn axes_mut(&mut self, slot: usize) -> LpuvisResult<&mut Axes> {
        self.axes
            .iter_mut()
            .find(|a| a.slot == slot)
            .ok_or_else(|| LpuvisError::render(format!("figure has no axes in slot {slot}")))
    }

    /// Replace the axes at `slot` with an empty 3-D axes.
    pub fn make_3d(&mut self, slot: usize) -> LpuvisResult<&mut Axes> {
        let axes = self.axes_mut(slot)?;
        *axes = Axes::new(slot, AxesProjection::ThreeD);
        Ok(axes)
    }

    /// Pixel size at `dpi`, rounded down to even dimensions (minimum 2x2).
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        fn even(v: f64) -> u32 {
            let px = (v.max(2.0).floor() as u32) & !1;
            px.max(2)
        }
        (even(self.size_in.0 * dpi), even(self.size_in.1 * dpi))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/figure/model.rs"]
mod tests;
