use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::render::backend::FrameRGBA;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Holds frame submissions to the frame rate.
#[derive(Debug, Default)]
pub(crate) struct FramePacer {
    frame_duration: Option<Duration>,
    last_push: Option<Instant>,
}

impl FramePacer {
    pub(crate) fn start(&mut self, cfg: &SinkConfig) -> LpuvisResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(LpuvisError::validation("fps must be non-zero"));
        }
        self.frame_duration = Some(Duration::from_secs_f64(cfg.fps.frame_duration_secs()));
        self.last_push = None;
        Ok(())
    }

    /// Sleep out the rest of the current frame slot.
    pub(crate) fn wait(&mut self) -> LpuvisResult<()> {
        let frame_duration = self
            .frame_duration
            .ok_or_else(|| LpuvisError::render("live sink not started"))?;
        if let Some(last) = self.last_push {
            let elapsed = last.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        self.last_push = Some(Instant::now());
        Ok(())
    }

    pub(crate) fn stop(&mut self) {
        self.frame_duration = None;
    }
}

/// Live display: each frame overwrites one PNG, no faster than the frame rate.
///
/// An image viewer that reloads on change shows the animation as it runs. This is the
/// headless counterpart of the `window` feature's on-screen sink.
pub struct PreviewSink {
    path: PathBuf,
    pacer: FramePacer,
    frames: u64,
}

impl PreviewSink {
    /// Preview written to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pacer: FramePacer::default(),
            frames: 0,
        }
    }

    /// Output path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Frames shown so far.
    pub fn frames_shown(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for PreviewSink {
    fn begin(&mut self, cfg: SinkConfig) -> LpuvisResult<()> {
        self.pacer.start(&cfg)?;
        self.frames = 0;
        tracing::info!(path = %self.path.display(), "live preview");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LpuvisResult<()> {
        self.pacer.wait()?;
        frame.save_png(&self.path)?;
        self.frames += 1;
        tracing::debug!(frame = idx.0, "preview updated");
        Ok(())
    }

    fn end(&mut self) -> LpuvisResult<()> {
        self.pacer.stop();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/preview.rs"]
mod tests;
