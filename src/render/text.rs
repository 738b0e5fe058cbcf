use crate::foundation::error::{LpuvisError, LpuvisResult};
use std::path::{Path, PathBuf};

/// Font files tried, in order, when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First existing font among well-known system locations.
pub fn locate_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS.iter().map(PathBuf::from).find(|p| p.is_file())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    pub(crate) const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Laid-out label with its pixel extent.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Parley contexts plus the single face every label is set in.
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextEngine {
    pub(crate) fn from_bytes(font_bytes: Vec<u8>) -> LpuvisResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| LpuvisError::data("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LpuvisError::data("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    pub(crate) fn from_file(path: &Path) -> LpuvisResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| LpuvisError::data(format!("read font '{}': {e}", path.display())))?;
        let engine = Self::from_bytes(bytes)?;
        tracing::debug!(path = %path.display(), family = %engine.family, "loaded label font");
        Ok(engine)
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape one line of `text` at `size_px`.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> LpuvisResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(LpuvisError::validation(
                "text size must be finite and > 0",
            ));
        }
        let family = self.family.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(ShapedText {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            layout,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
