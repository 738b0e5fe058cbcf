use crate::figure::Figure;
use crate::foundation::error::{LpuvisError, LpuvisResult};
use std::path::Path;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by [`crate::render::cpu::CpuFigureRenderer`] are premultiplied; the flag
/// makes this explicit at sink boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Write the frame as a PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> LpuvisResult<()> {
        use anyhow::Context as _;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| LpuvisError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Turns the retained figure into pixels.
pub trait FigureRenderer {
    /// Render `fig` at `dpi` dots per inch.
    fn render(&mut self, fig: &Figure, dpi: f64) -> LpuvisResult<FrameRGBA>;
}
