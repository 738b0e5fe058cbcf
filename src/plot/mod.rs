//! Per-kind first draw and per-tick recompute.
//!
//! A [`Panel`] pairs a resolved [`PanelSpec`] with the axes slot it owns and the kind-specific
//! [`PanelState`] created by its first draw. Updates dispatch on that state, never on strings.

/// Dome panels.
pub mod dome;
/// Vector-field, hue-magnitude and single-channel image panels.
pub mod image;
/// Event raster panels.
pub mod raster;
/// Waveform and rate panels.
pub mod waveform;

use crate::figure::Figure;
use crate::foundation::error::LpuvisResult;
use crate::panel::builder::PanelSpec;
use crate::panel::kind::PlotKind;
use crate::projection::dome::DomeGrid;
use crate::projection::nearest::NearestBasis;
use crate::shading::norm::Normalize;
use crate::source::registry::Source;
use crate::style::apply_style;
use std::sync::Arc;

/// Engine-wide axis limits applied by the first draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLimits {
    /// X limits of waveform panels.
    pub xlim: (f64, f64),
    /// Y limits of waveform panels.
    pub ylim: (f64, f64),
    /// Intensity limits of single-channel images.
    pub imlim: (f64, f64),
}

/// Everything a handler needs besides its own panel.
#[derive(Clone, Debug)]
pub struct DrawContext {
    /// Time cursor; 0 for the first draw.
    pub t: usize,
    /// Update stride.
    pub stride: usize,
    /// Seconds per timestep.
    pub dt: f64,
    /// Engine-wide limits.
    pub limits: PlotLimits,
    /// Base font size.
    pub fontsize: f64,
    /// Shared hemisphere grid.
    pub dome: Arc<DomeGrid>,
}

impl DrawContext {
    /// Current window `[max(0, t - stride), t)`.
    pub fn window(&self) -> (usize, usize) {
        (self.t.saturating_sub(self.stride), self.t)
    }
}

/// Kind-specific state kept between ticks.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelState {
    /// Vector-field, hue-magnitude and image panels are recomputed from one timestep.
    Reshaped,
    /// Waveform of a single channel: first sample plus every sample appended since.
    Rolling {
        /// Data row.
        row: usize,
        /// Sample drawn at `t = 0`.
        initial: f64,
        /// Samples appended by ticks, one per timestep advanced.
        buffer: Vec<f64>,
    },
    /// Waveform over several channels; y-data is replaced every tick.
    Snapshot,
    /// Event raster; one optional data row per selected neuron.
    Raster {
        /// Row per selected neuron, `None` when the neuron has no data row.
        rows: Vec<Option<usize>>,
    },
    /// Population rate.
    Rate {
        /// Data rows of the counted neurons.
        rows: Vec<usize>,
    },
    /// Dome projection.
    Dome {
        /// Data rows feeding the nodes, in basis order.
        rows: Vec<usize>,
        /// Nearest node per grid sample.
        basis: NearestBasis,
        /// Value range mapped onto the gray ramp.
        norm: Normalize,
    },
}

/// A panel bound to its axes slot.
#[derive(Clone, Debug)]
pub struct Panel {
    spec: PanelSpec,
    slot: usize,
    state: PanelState,
}

impl Panel {
    /// Perform the kind-specific first draw into `slot` of `fig`.
    pub fn first_draw(
        spec: PanelSpec,
        slot: usize,
        source: &Source,
        fig: &mut Figure,
        ctx: &DrawContext,
    ) -> LpuvisResult<Self> {
        let axes = if spec.kind == PlotKind::Dome {
            fig.make_3d(slot)?
        } else {
            fig.axes_mut(slot)?
        };
        let state = match spec.kind {
            PlotKind::VectorField | PlotKind::HueMagnitude | PlotKind::Image => {
                image::first_draw(&spec, source, axes, ctx)?
            }
            PlotKind::Waveform => waveform::first_draw(&spec, source, axes, ctx)?,
            PlotKind::Rate => waveform::first_draw_rate(&spec, source, axes, ctx)?,
            PlotKind::Raster => raster::first_draw(&spec, source, axes, ctx)?,
            PlotKind::Dome => dome::first_draw(&spec, source, axes, ctx)?,
        };
        apply_style(axes, &spec.style.attrs(Some(&spec.title), ctx.fontsize));
        axes.decor.hide_ticks();
        Ok(Self { spec, slot, state })
    }

    /// Recompute the panel payload for `ctx.t`.
    pub fn update(
        &mut self,
        source: &Source,
        fig: &mut Figure,
        ctx: &DrawContext,
    ) -> LpuvisResult<()> {
        let axes = fig.axes_mut(self.slot)?;
        match &mut self.state {
            PanelState::Reshaped => image::update(&self.spec, source, axes, ctx)?,
            PanelState::Rolling {
                row,
                initial,
                buffer,
            } => waveform::update_rolling(*row, *initial, buffer, source, axes, ctx)?,
            PanelState::Snapshot => waveform::update_snapshot(&self.spec, source, axes, ctx)?,
            PanelState::Rate { rows } => waveform::update_rate(rows, source, axes, ctx)?,
            PanelState::Raster { rows } => raster::update(rows, source, axes, ctx)?,
            PanelState::Dome { rows, basis, norm } => {
                dome::update(rows, basis, norm, source, axes, ctx)?
            }
        }
        apply_style(axes, &self.spec.style.attrs(Some(&self.spec.title), ctx.fontsize));
        Ok(())
    }

    /// Resolved specification.
    pub fn spec(&self) -> &PanelSpec {
        &self.spec
    }

    /// Axes slot.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Kind-specific state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plot/panel.rs"]
mod tests;
