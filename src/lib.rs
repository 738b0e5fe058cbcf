//! lpuvis renders the output of neural-circuit simulations as animated multi-panel figures.
//!
//! The public API is driver-oriented:
//!
//! - Register [`Source`]s (time series plus optional [`Topology`]) on a [`Visualizer`]
//! - Add panels described by a [`PanelConfig`]
//! - [`Visualizer::run`] to a video file or live preview, or [`Visualizer::run_with`] any
//!   [`FigureRenderer`] and [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame sinks: video encoder, live window or preview, in-memory.
pub mod encode;
/// Retained figure model.
pub mod figure;
/// Panel grid layout.
pub mod layout;
/// Panel configuration and resolution.
pub mod panel;
/// Per-kind first draw and tick recompute.
pub mod plot;
/// Dome projection.
pub mod projection;
/// Figure rasterization.
pub mod render;
/// Normalization and color mapping.
pub mod shading;
/// Animation driver and project files.
pub mod session;
/// Data sources and topologies.
pub mod source;
/// Typed style options and their application.
pub mod style;

pub use crate::foundation::core::{Fps, FrameIndex, Matrix, Point, Rect, TimeWindow};
pub use crate::foundation::error::{LpuvisError, LpuvisResult};
pub use crate::foundation::math::near_square_shape;

pub use crate::encode::ffmpeg::{EncoderPreference, FfmpegSink, FfmpegSinkOpts, select_encoder};
pub use crate::encode::preview::PreviewSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
#[cfg(feature = "window")]
pub use crate::encode::window::{FrameViewer, WindowSink, show_frames};
pub use crate::figure::Figure;
pub use crate::panel::builder::PanelSpec;
pub use crate::panel::config::{NormKeyword, NormSpec, PanelConfig};
pub use crate::panel::kind::PlotKind;
pub use crate::plot::PanelState;
pub use crate::render::backend::{FigureRenderer, FrameRGBA};
pub use crate::render::cpu::CpuFigureRenderer;
pub use crate::session::config::VisualizerConfig;
pub use crate::session::driver::{
    AnimationState, DriverState, RunOpts, RunStats, Visualizer, effective_stride,
};
pub use crate::session::project::{ProjectFile, load_project};
pub use crate::source::io::{DataLoader, JsonLoader};
pub use crate::source::registry::{Source, SourceDesc, SourceKind, SourceRegistry};
pub use crate::source::topology::{NodeAttrs, Topology};
pub use crate::style::StyleOptions;
