use crate::figure::{Artist, Axes, TextLabel, VLinesArtist};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::panel::builder::PanelSpec;
use crate::plot::waveform::resolve_rows;
use crate::plot::{DrawContext, PanelState};
use crate::shading::color::Rgb8;
use crate::source::registry::Source;

/// Raster axes: one row per selected neuron, time on x.
///
/// The x bound is the series length of the row holding the smallest spiking id.
pub(crate) fn first_draw(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<PanelState> {
    let ids = spec.primary();
    let data = source.data();
    let min_row = match source.index_map() {
        Some(map) => map
            .min_id()
            .and_then(|id| map.row(id))
            .ok_or_else(|| {
                LpuvisError::configuration(format!(
                    "raster panel '{}' on a source without spiking neurons",
                    spec.title
                ))
            })?,
        None => 0,
    };
    let len = data.row(min_row)?.len();

    axes.push(Artist::VLines(VLinesArtist {
        segments: vec![(0.0, 0.0, 0.01)],
        color: Rgb8::BLACK,
    }));
    axes.decor.ylim = Some((0.5, ids.len() as f64 + 0.5));
    axes.decor.xlim = Some((0.0, len as f64 * ctx.dt));
    let label_size = ctx.fontsize - 1.0;
    axes.decor.ylabel = Some(TextLabel::bold("Neurons", label_size));
    axes.decor.xlabel = Some(TextLabel::bold("Time (s)", label_size));

    Ok(PanelState::Raster {
        rows: resolve_rows(ids, source),
    })
}

/// Mark every nonzero sample of the current window.
///
/// Neuron `j` occupies `[j + 0.75, j + 1.25]`; a sample `k` steps into the window is drawn at
/// `(t - k) * dt`.
pub(crate) fn update(
    rows: &[Option<usize>],
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let (start, end) = ctx.window();
    let mut marks = Vec::new();
    for (j, row) in rows.iter().enumerate() {
        let Some(row) = *row else {
            continue;
        };
        let window = source.data().window(row, start, end)?;
        for (k, _) in window.iter().enumerate().filter(|(_, v)| **v != 0.0) {
            let x = ctx.t.saturating_sub(k) as f64 * ctx.dt;
            marks.push((x, j as f64 + 0.75, j as f64 + 1.25));
        }
    }
    let slot = axes.slot;
    match axes.artist_mut(0)? {
        Artist::VLines(v) => v.segments.extend(marks),
        _ => {
            return Err(LpuvisError::render(format!(
                "axes slot {slot} holds no raster"
            )));
        }
    }
    Ok(())
}
