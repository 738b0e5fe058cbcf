use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_on_path, select_encoder};
use crate::encode::preview::PreviewSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::figure::{Figure, TextLabel};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::layout::allocate;
use crate::panel::builder::{PanelSpec, build_panel};
use crate::panel::config::PanelConfig;
use crate::plot::{DrawContext, Panel};
use crate::projection::dome::DomeGrid;
use crate::render::backend::FigureRenderer;
use crate::render::cpu::CpuFigureRenderer;
use crate::session::config::VisualizerConfig;
use crate::source::io::DataLoader;
use crate::source::registry::{SourceDesc, SourceRegistry};
use std::path::PathBuf;
use std::sync::Arc;

/// Lifecycle of a [`Visualizer`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No first draw yet.
    Uninitialized,
    /// First draw done and stride derived.
    Ready,
    /// Inside the tick loop.
    Advancing,
    /// Loop exhausted and outputs finalized.
    Finished,
}

/// Stride replacing a zero update interval: `maxt - 1`, at least 1.
pub fn effective_stride(update_interval: usize, maxt: usize) -> usize {
    if update_interval == 0 {
        maxt.saturating_sub(1).max(1)
    } else {
        update_interval
    }
}

/// Time cursor of the tick loop.
///
/// Ticks happen at reference points `stride, 2 * stride, ... < maxt`; the cursor `t` runs one
/// step ahead of the reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    /// Current time cursor.
    pub t: usize,
    /// Timesteps advanced per tick.
    pub stride: usize,
    /// Global time bound.
    pub maxt: usize,
}

impl AnimationState {
    /// Cursor positioned on the first tick.
    pub fn new(update_interval: usize, maxt: usize) -> Self {
        let stride = effective_stride(update_interval, maxt);
        Self {
            t: stride + 1,
            stride,
            maxt,
        }
    }

    /// Number of ticks in a full run.
    pub fn tick_count(&self) -> usize {
        if self.maxt > self.stride {
            (self.maxt - 1 - self.stride) / self.stride + 1
        } else {
            0
        }
    }
}

/// Options of one run beyond the configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOpts {
    /// Save the terminal frame as a PNG.
    pub final_frame: Option<PathBuf>,
    /// Resolution of the terminal frame.
    pub final_dpi: f64,
    /// Image file backing the live preview.
    pub preview: Option<PathBuf>,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            final_frame: None,
            final_dpi: 300.0,
            preview: None,
        }
    }
}

impl RunOpts {
    /// Run that only saves the terminal frame to `path`.
    pub fn final_frame(path: impl Into<PathBuf>) -> Self {
        Self {
            final_frame: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Counters of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames submitted to the sink.
    pub frames_rendered: u64,
    /// Ticks executed.
    pub ticks: u64,
    /// Draw passes over all panels: the first draw plus one per tick.
    pub draws: u64,
    /// Stride used by the tick loop.
    pub effective_stride: usize,
}

/// Animation driver: owns the sources, the panel specifications and the run state.
pub struct Visualizer {
    config: VisualizerConfig,
    registry: SourceRegistry,
    specs: Vec<PanelSpec>,
    dome: Arc<DomeGrid>,
    state: DriverState,
    figure: Option<Figure>,
    panels: Vec<Panel>,
}

impl Visualizer {
    /// Empty visualizer.
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            config,
            registry: SourceRegistry::new(),
            specs: Vec::new(),
            dome: Arc::new(DomeGrid::default()),
            state: DriverState::Uninitialized,
            figure: None,
            panels: Vec::new(),
        }
    }

    /// Run-time configuration.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Mutable run-time configuration.
    pub fn config_mut(&mut self) -> &mut VisualizerConfig {
        &mut self.config
    }

    /// Registered sources.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Register a source and return its identifier.
    pub fn add_source(
        &mut self,
        desc: SourceDesc,
        loader: &dyn DataLoader,
    ) -> LpuvisResult<String> {
        self.registry.register(desc, loader)
    }

    /// Resolve and add one panel of `source`.
    pub fn add_panel(
        &mut self,
        source: &str,
        config: PanelConfig,
        names: &[String],
        shift: i64,
    ) -> LpuvisResult<()> {
        let spec = build_panel(&self.registry, source, config, names, shift)?;
        self.specs.push(spec);
        Ok(())
    }

    /// Panel specifications in slot order: grouped by source, sources in order of first use.
    pub fn panel_specs(&self) -> Vec<&PanelSpec> {
        let mut order: Vec<&str> = Vec::new();
        for spec in &self.specs {
            if !order.contains(&spec.source.as_str()) {
                order.push(&spec.source);
            }
        }
        order
            .iter()
            .flat_map(|src| self.specs.iter().filter(move |s| s.source == *src))
            .collect()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Figure of the last run.
    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Panels of the last run in slot order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// CPU renderer using the configured label font.
    pub fn cpu_renderer(&self) -> LpuvisResult<CpuFigureRenderer> {
        match &self.config.font {
            Some(path) => CpuFigureRenderer::new().with_font_file(path),
            None => Ok(CpuFigureRenderer::new()),
        }
    }

    /// Run with the CPU renderer and the sink chosen from the configuration.
    ///
    /// Video is written when `out_path` is set and the update interval is non-zero. Without an
    /// output path and without a terminal-frame export, frames go to a live display: an
    /// on-screen window with the `window` feature unless `opts.preview` names a PNG, the PNG
    /// preview otherwise.
    #[tracing::instrument(skip_all, fields(panels = self.specs.len()))]
    pub fn run(&mut self, opts: &RunOpts) -> LpuvisResult<RunStats> {
        #[cfg(feature = "window")]
        if self.config.out_path.is_none() && opts.final_frame.is_none() && opts.preview.is_none()
        {
            let title = self.config.title.clone().unwrap_or_else(|| "lpuvis".to_string());
            let fps = self.config.frame_rate()?;
            return crate::encode::window::show_frames(&title, fps, |sink| {
                let mut renderer = self.cpu_renderer()?;
                self.run_with(&mut renderer, Some(sink), opts)
            });
        }

        let mut renderer = self.cpu_renderer()?;
        let mut sink: Option<Box<dyn FrameSink>> = match &self.config.out_path {
            Some(out) if self.config.update_interval != 0 => {
                let binary = select_encoder(self.config.encoder, is_on_path)?;
                tracing::info!(encoder = binary, "selected video encoder");
                let mut sink_opts = FfmpegSinkOpts::new(out, self.config.codec.clone())
                    .with_binary(binary);
                sink_opts.overwrite = self.config.overwrite;
                Some(Box::new(FfmpegSink::new(sink_opts)))
            }
            Some(out) => {
                tracing::warn!(
                    out = %out.display(),
                    "video output needs a non-zero update interval; no video is written"
                );
                None
            }
            None if opts.final_frame.is_none() => {
                let path = opts
                    .preview
                    .clone()
                    .unwrap_or_else(|| std::env::temp_dir().join("lpuvis-preview.png"));
                Some(Box::new(PreviewSink::new(path)))
            }
            None => None,
        };
        match sink.as_deref_mut() {
            Some(sink) => self.run_with(&mut renderer, Some(sink), opts),
            None => self.run_with(&mut renderer, None, opts),
        }
    }

    /// Run with an explicit renderer and optional sink.
    #[tracing::instrument(skip_all, fields(panels = self.specs.len()))]
    pub fn run_with(
        &mut self,
        renderer: &mut dyn FigureRenderer,
        mut sink: Option<&mut dyn FrameSink>,
        opts: &RunOpts,
    ) -> LpuvisResult<RunStats> {
        if self.registry.is_empty() {
            return Err(LpuvisError::configuration("no sources registered"));
        }
        if self.specs.is_empty() {
            return Err(LpuvisError::configuration("no panels added"));
        }
        let maxt = self
            .registry
            .maxt()
            .ok_or_else(|| LpuvisError::configuration("no sources registered"))?;

        self.state = DriverState::Uninitialized;
        self.figure = None;
        self.panels.clear();

        let specs: Vec<PanelSpec> = self.panel_specs().into_iter().cloned().collect();
        let cfg = &self.config;
        let mut fig = allocate(specs.len(), cfg.rows, cfg.cols, cfg.figsize, cfg.fontsize);
        fig.suptitle = cfg
            .title
            .as_ref()
            .map(|t| TextLabel::bold(t.as_str(), cfg.fontsize + 1.0));

        let mut anim = AnimationState::new(cfg.update_interval, maxt);
        let mut ctx = DrawContext {
            t: 0,
            stride: anim.stride,
            dt: cfg.dt,
            limits: cfg.limits(),
            fontsize: cfg.fontsize,
            dome: self.dome.clone(),
        };
        tracing::info!(
            panels = specs.len(),
            maxt,
            stride = anim.stride,
            ticks = anim.tick_count(),
            "starting run"
        );

        let mut panels = Vec::with_capacity(specs.len());
        for (slot, spec) in specs.into_iter().enumerate() {
            let source = self.registry.source(&spec.source)?;
            panels.push(Panel::first_draw(spec, slot, source, &mut fig, &ctx)?);
        }
        self.state = DriverState::Ready;

        let mut stats = RunStats {
            draws: 1,
            effective_stride: anim.stride,
            ..RunStats::default()
        };
        if let Some(sink) = sink.as_deref_mut() {
            let frame = renderer.render(&fig, cfg.video_dpi)?;
            sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                fps: cfg.frame_rate()?,
            })?;
            sink.push_frame(FrameIndex(0), &frame)?;
            stats.frames_rendered += 1;
        }

        self.state = DriverState::Advancing;
        while anim.t - 1 < anim.maxt {
            ctx.t = anim.t;
            for panel in &mut panels {
                let source = self.registry.source(&panel.spec().source)?;
                panel.update(source, &mut fig, &ctx)?;
            }
            stats.ticks += 1;
            stats.draws += 1;
            if let Some(sink) = sink.as_deref_mut() {
                let frame = renderer.render(&fig, cfg.video_dpi)?;
                sink.push_frame(FrameIndex(stats.frames_rendered), &frame)?;
                stats.frames_rendered += 1;
            }
            tracing::debug!(t = anim.t, "tick");
            anim.t += anim.stride;
        }

        if let Some(path) = &opts.final_frame {
            renderer.render(&fig, opts.final_dpi)?.save_png(path)?;
            tracing::info!(path = %path.display(), dpi = opts.final_dpi, "wrote final frame");
        }
        if let Some(sink) = sink.as_deref_mut() {
            sink.end()?;
        }
        self.state = DriverState::Finished;
        tracing::info!(
            ticks = stats.ticks,
            frames = stats.frames_rendered,
            "run finished"
        );

        self.figure = Some(fig);
        self.panels = panels;
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
