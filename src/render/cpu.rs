use crate::figure::{
    Artist, Axes, AxesDecor, AxesProjection, Figure, ImageArtist, LineArtist, Marker,
    QuiverArtist, SurfaceArtist, TextLabel, VLinesArtist,
};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::render::backend::{FigureRenderer, FrameRGBA};
use crate::render::geometry::{
    DataTransform, OrthoCamera, cell_rect, data_limits, image_cell, image_cell_rgb, plot_rect,
    square_viewport, suptitle_rect,
};
use crate::render::text::{TextBrushRgba8, TextEngine, locate_system_font};
use crate::shading::color::Rgb8;
use kurbo::{BezPath, Vec2};
use std::path::Path;
use vello_cpu::kurbo::Affine;

const AXES_EDGE: Rgb8 = Rgb8::BLACK;

/// Where a label sits relative to a pixel rectangle.
#[derive(Clone, Copy, Debug)]
enum Placement {
    Above(Rect),
    Below(Rect),
    /// Rotated to read bottom-up, left of the rectangle.
    Left(Rect),
    Centered(Rect),
}

/// CPU renderer powered by `vello_cpu`, with labels shaped by `parley`.
///
/// Labels are set in one font face. Without a font, figures render without text.
pub struct CpuFigureRenderer {
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextEngine>,
    background: Rgb8,
    camera: OrthoCamera,
}

impl Default for CpuFigureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuFigureRenderer {
    /// Renderer with a white background and the first system font found.
    pub fn new() -> Self {
        let text = match locate_system_font() {
            Some(path) => match TextEngine::from_file(&path) {
                Ok(engine) => Some(engine),
                Err(err) => {
                    tracing::warn!(%err, "system font unusable; labels are not drawn");
                    None
                }
            },
            None => {
                tracing::warn!("no system font found; labels are not drawn");
                None
            }
        };
        Self {
            ctx: None,
            text,
            background: Rgb8::WHITE,
            camera: OrthoCamera::default(),
        }
    }

    /// Set labels in the font stored at `path`.
    pub fn with_font_file(mut self, path: &Path) -> LpuvisResult<Self> {
        self.text = Some(TextEngine::from_file(path)?);
        Ok(self)
    }

    /// Whether labels are rasterized.
    pub fn draws_text(&self) -> bool {
        self.text.is_some()
    }

    /// Use `camera` for 3-D axes.
    pub fn with_camera(mut self, camera: OrthoCamera) -> Self {
        self.camera = camera;
        self
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> LpuvisResult<R>,
    ) -> LpuvisResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn draw_axes(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        axes: &Axes,
        rect: Rect,
        lw: f64,
    ) -> LpuvisResult<()> {
        match axes.projection {
            AxesProjection::Flat => {
                let (xlim, ylim) = data_limits(axes);
                let tr = DataTransform::new(xlim, ylim, rect);
                for artist in &axes.artists {
                    match artist {
                        Artist::Image(img) => draw_image(ctx, img, rect),
                        Artist::Line(line) => draw_line(ctx, line, &tr, lw),
                        Artist::Quiver(q) => draw_quiver(ctx, q, &tr, lw),
                        Artist::VLines(v) => draw_vlines(ctx, v, &tr, lw),
                        Artist::Surface(_) => {
                            return Err(LpuvisError::render(format!(
                                "axes slot {} draws a surface without a 3-D projection",
                                axes.slot
                            )));
                        }
                    }
                }
                draw_frame(ctx, rect, lw);
            }
            AxesProjection::ThreeD => {
                let view = square_viewport(rect, 0.05);
                for artist in &axes.artists {
                    if let Artist::Surface(s) = artist {
                        draw_surface(ctx, s, view, &self.camera);
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_decor(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        decor: &AxesDecor,
        rect: Rect,
        px_per_pt: f64,
    ) -> LpuvisResult<()> {
        if let Some(label) = &decor.title {
            self.draw_label(ctx, label, px_per_pt, Placement::Above(rect))?;
        }
        if let Some(label) = &decor.xlabel {
            self.draw_label(ctx, label, px_per_pt, Placement::Below(rect))?;
        }
        if let Some(label) = &decor.ylabel {
            self.draw_label(ctx, label, px_per_pt, Placement::Left(rect))?;
        }
        Ok(())
    }

    fn draw_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        label: &TextLabel,
        px_per_pt: f64,
        placement: Placement,
    ) -> LpuvisResult<()> {
        let Some(engine) = self.text.as_mut() else {
            return Ok(());
        };
        if label.text.trim().is_empty() {
            return Ok(());
        }
        let size = label.size * px_per_pt;
        let shaped = engine.shape(&label.text, size as f32, TextBrushRgba8::BLACK)?;
        let (w, h) = (shaped.width, shaped.height);
        let pad = 0.3 * size;

        let origin = match placement {
            Placement::Above(r) => {
                Affine::translate((r.center().x - w / 2.0, (r.y0 - pad - h).max(0.0)))
            }
            Placement::Below(r) => Affine::translate((r.center().x - w / 2.0, r.y1 + pad)),
            Placement::Left(r) => {
                Affine::translate(((r.x0 - pad - h).max(0.0), r.center().y + w / 2.0))
                    * Affine::rotate(-std::f64::consts::FRAC_PI_2)
            }
            Placement::Centered(r) => {
                Affine::translate((r.center().x - w / 2.0, r.center().y - h / 2.0))
            }
        };
        // Bold is emboldened by a second pass shifted along the baseline.
        let shifts: &[f64] = if label.bold {
            &[0.0, (size / 24.0).max(0.5)]
        } else {
            &[0.0]
        };
        for &dx in shifts {
            ctx.set_transform(origin * Affine::translate((dx, 0.0)));
            fill_layout(ctx, &shaped.layout, engine.font());
        }
        ctx.set_transform(Affine::IDENTITY);
        Ok(())
    }
}

impl FigureRenderer for CpuFigureRenderer {
    fn render(&mut self, fig: &Figure, dpi: f64) -> LpuvisResult<FrameRGBA> {
        let (width, height) = fig.pixel_size(dpi);
        let w = u16::try_from(width).map_err(|_| {
            LpuvisError::validation(format!("frame width {width} exceeds {}", u16::MAX))
        })?;
        let h = u16::try_from(height).map_err(|_| {
            LpuvisError::validation(format!("frame height {height} exceeds {}", u16::MAX))
        })?;
        let px_per_pt = dpi / 72.0;
        let lw = px_per_pt.max(1.0);

        let pixmap = self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_transform(Affine::IDENTITY);
            set_color(ctx, this.background);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
            for axes in fig.axes() {
                let cell = cell_rect(fig, axes.slot, f64::from(w), f64::from(h));
                let rect = plot_rect(cell);
                this.draw_axes(ctx, axes, rect, lw)?;
                this.draw_decor(ctx, &axes.decor, rect, px_per_pt)?;
            }
            if let Some(title) = &fig.suptitle {
                let band = suptitle_rect(f64::from(w), f64::from(h));
                this.draw_label(ctx, title, px_per_pt, Placement::Centered(band))?;
            }
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap)
        })?;

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgb8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::ClosePath => out.close_path(),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    }
    out
}

fn polygon(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    Some(path)
}

fn fill_polygon(ctx: &mut vello_cpu::RenderContext, points: &[Point]) {
    if let Some(path) = polygon(points) {
        ctx.fill_path(&bezpath_to_cpu(&path));
    }
}

/// Segment `a-b` as a filled quad of width `w`.
fn segment_quad(a: Point, b: Point, w: f64) -> [Point; 4] {
    let d = b - a;
    let n = if d.hypot() > 0.0 {
        Vec2::new(-d.y, d.x).normalize() * (w / 2.0)
    } else {
        Vec2::new(w / 2.0, 0.0)
    };
    [a + n, b + n, b - n, a - n]
}

fn draw_frame(ctx: &mut vello_cpu::RenderContext, rect: Rect, lw: f64) {
    set_color(ctx, AXES_EDGE);
    let h = lw / 2.0;
    for edge in [
        Rect::new(rect.x0 - h, rect.y0 - h, rect.x1 + h, rect.y0 + h),
        Rect::new(rect.x0 - h, rect.y1 - h, rect.x1 + h, rect.y1 + h),
        Rect::new(rect.x0 - h, rect.y0 - h, rect.x0 + h, rect.y1 + h),
        Rect::new(rect.x1 - h, rect.y0 - h, rect.x1 + h, rect.y1 + h),
    ] {
        ctx.fill_rect(&rect_to_cpu(edge));
    }
}

fn draw_image(ctx: &mut vello_cpu::RenderContext, img: &ImageArtist, rect: Rect) {
    for row in 0..img.rows {
        for col in 0..img.cols {
            let Some(rgb) = image_cell_rgb(&img.pixels, row * img.cols + col) else {
                continue;
            };
            set_color(ctx, Rgb8::from_unit(rgb));
            ctx.fill_rect(&rect_to_cpu(image_cell(rect, img.rows, img.cols, row, col)));
        }
    }
}

fn draw_line(ctx: &mut vello_cpu::RenderContext, line: &LineArtist, tr: &DataTransform, lw: f64) {
    set_color(ctx, line.style.color);
    let pts: Vec<(f64, f64)> = line.x.iter().copied().zip(line.y.iter().copied()).collect();
    if line.style.connect {
        for pair in pts.windows(2) {
            if let Some((a, b)) = tr.clip(pair[0], pair[1]) {
                fill_polygon(ctx, &segment_quad(tr.apply(a.0, a.1), tr.apply(b.0, b.1), lw));
            }
        }
    }
    let size = match line.style.marker {
        Marker::None => return,
        Marker::Point => 2.0 * lw,
        Marker::Circle => 4.0 * lw,
    };
    for &(x, y) in &pts {
        if tr.clip((x, y), (x, y)).is_none() {
            continue;
        }
        let p = tr.apply(x, y);
        let half = size / 2.0;
        ctx.fill_rect(&rect_to_cpu(Rect::new(
            p.x - half,
            p.y - half,
            p.x + half,
            p.y + half,
        )));
    }
}

fn draw_vlines(ctx: &mut vello_cpu::RenderContext, v: &VLinesArtist, tr: &DataTransform, lw: f64) {
    set_color(ctx, v.color);
    for &(x, y0, y1) in &v.segments {
        if let Some((a, b)) = tr.clip((x, y0), (x, y1)) {
            fill_polygon(ctx, &segment_quad(tr.apply(a.0, a.1), tr.apply(b.0, b.1), lw));
        }
    }
}

fn draw_quiver(ctx: &mut vello_cpu::RenderContext, q: &QuiverArtist, tr: &DataTransform, lw: f64) {
    let max = q
        .u
        .iter()
        .zip(q.v.iter())
        .map(|(u, v)| u.hypot(*v))
        .filter(|m| m.is_finite())
        .fold(0.0f64, f64::max);
    if max == 0.0 {
        return;
    }
    let cell =
        (tr.rect.width() / q.cols.max(1) as f64).min(tr.rect.height() / q.rows.max(1) as f64);
    let scale = 0.9 * cell / max;
    set_color(ctx, q.color);
    for row in 0..q.rows {
        for col in 0..q.cols {
            let i = row * q.cols + col;
            let (Some(&u), Some(&v)) = (q.u.get(i), q.v.get(i)) else {
                continue;
            };
            if !u.is_finite() || !v.is_finite() || (u == 0.0 && v == 0.0) {
                continue;
            }
            let tail = tr.apply(col as f64, row as f64);
            let d = Vec2::new(u, -v) * scale;
            let tip = tail + d;
            let head = (d.hypot() * 0.3).max(2.0 * lw);
            let back = tip - d.normalize() * head;
            let side = Vec2::new(-d.y, d.x).normalize() * (head * 0.4);
            fill_polygon(ctx, &segment_quad(tail, back, lw));
            fill_polygon(ctx, &[tip, back + side, back - side]);
        }
    }
}

fn draw_surface(
    ctx: &mut vello_cpu::RenderContext,
    s: &SurfaceArtist,
    view: Rect,
    camera: &OrthoCamera,
) {
    let (rows, cols) = s.grid.shape();
    if rows < 2 || cols < 2 {
        return;
    }
    let projected: Vec<(f64, f64, f64)> =
        s.grid.points().iter().map(|&p| camera.project(p)).collect();
    let half = view.width() / 2.0;
    let center = view.center();
    let to_px = |(x, y, _): (f64, f64, f64)| {
        Point::new(center.x + x * half * 0.8, center.y - y * half * 0.8)
    };

    let mut faces = Vec::with_capacity((rows - 1) * (cols - 1));
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let idx = [
                r * cols + c,
                r * cols + c + 1,
                (r + 1) * cols + c + 1,
                (r + 1) * cols + c,
            ];
            let depth = idx.iter().map(|&i| projected[i].2).sum::<f64>() / 4.0;
            faces.push((depth, r * cols + c, idx));
        }
    }
    faces.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, color_i, idx) in faces {
        let Some(rgba) = s.facecolors.get(color_i) else {
            continue;
        };
        let [r, g, b, a] = rgba.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        let quad = idx.map(|i| to_px(projected[i]));
        fill_polygon(ctx, &quad);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
