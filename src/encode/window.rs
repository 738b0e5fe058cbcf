use crate::encode::preview::FramePacer;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::render::backend::FrameRGBA;
use eframe::egui;
use std::sync::mpsc::{Receiver, SyncSender};
use std::time::Duration;

/// On-screen sink: forwards frames to a [`FrameViewer`] window, paced to the frame rate.
///
/// Once the window is closed, further frames are dropped and the run finishes unpaced.
pub struct WindowSink {
    tx: SyncSender<FrameRGBA>,
    pacer: FramePacer,
    closed: bool,
    frames: u64,
}

impl WindowSink {
    /// Sink feeding the viewer that owns the other end of `tx`.
    pub fn new(tx: SyncSender<FrameRGBA>) -> Self {
        Self {
            tx,
            pacer: FramePacer::default(),
            closed: false,
            frames: 0,
        }
    }

    /// Frames delivered to the window.
    pub fn frames_shown(&self) -> u64 {
        self.frames
    }

    /// Whether the window went away.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSink for WindowSink {
    fn begin(&mut self, cfg: SinkConfig) -> LpuvisResult<()> {
        self.pacer.start(&cfg)?;
        self.frames = 0;
        tracing::info!(width = cfg.width, height = cfg.height, "live window");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LpuvisResult<()> {
        if self.closed {
            return Ok(());
        }
        self.pacer.wait()?;
        if self.tx.send(frame.clone()).is_err() {
            tracing::debug!(frame = idx.0, "window closed; dropping frames");
            self.closed = true;
            return Ok(());
        }
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> LpuvisResult<()> {
        self.pacer.stop();
        Ok(())
    }
}

/// Texture-backed `eframe` app showing the newest frame, scaled to fit.
pub struct FrameViewer {
    rx: Receiver<FrameRGBA>,
    texture: Option<egui::TextureHandle>,
    repaint: Duration,
}

impl FrameViewer {
    /// Viewer polling `rx` once per frame slot of `fps`.
    pub fn new(rx: Receiver<FrameRGBA>, fps: Fps) -> Self {
        Self {
            rx,
            texture: None,
            repaint: Duration::from_secs_f64(fps.frame_duration_secs()),
        }
    }
}

/// Frame pixels as an egui image.
pub fn color_image(frame: &FrameRGBA) -> egui::ColorImage {
    let size = [frame.width as usize, frame.height as usize];
    if frame.premultiplied {
        egui::ColorImage::from_rgba_premultiplied(size, &frame.data)
    } else {
        egui::ColorImage::from_rgba_unmultiplied(size, &frame.data)
    }
}

impl eframe::App for FrameViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(frame) = self.rx.try_iter().last() {
            let image = color_image(&frame);
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.texture =
                        Some(ctx.load_texture("lpuvis-frame", image, egui::TextureOptions::LINEAR));
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match &self.texture {
            Some(texture) => {
                let [w, h] = texture.size();
                let avail = ui.available_size();
                let scale = (avail.x / w as f32).min(avail.y / h as f32).max(0.0);
                let size = egui::vec2(w as f32 * scale, h as f32 * scale);
                ui.centered_and_justified(|ui| {
                    ui.image((texture.id(), size));
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("waiting for the first frame");
                });
            }
        });
        ctx.request_repaint_after(self.repaint);
    }
}

/// Run `producer` on a worker thread feeding a window on the calling thread.
///
/// The window stays open after the producer finishes, showing the last frame, until the user
/// closes it. Must be called from the main thread.
pub fn show_frames<R, F>(title: &str, fps: Fps, producer: F) -> LpuvisResult<R>
where
    R: Send,
    F: FnOnce(&mut dyn FrameSink) -> LpuvisResult<R> + Send,
{
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::scope(|scope| {
        let worker = scope.spawn(move || {
            let mut sink = WindowSink::new(tx);
            producer(&mut sink)
        });

        let viewer = FrameViewer::new(rx, fps);
        let opts = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_title(title),
            ..Default::default()
        };
        let shown = eframe::run_native(title, opts, Box::new(|_cc| Ok(Box::new(viewer))));

        let produced = worker
            .join()
            .map_err(|_| LpuvisError::render("frame producer panicked"))?;
        shown.map_err(|e| LpuvisError::render(format!("live window: {e}")))?;
        produced
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/window.rs"]
mod tests;
