use crate::figure::{Artist, Axes, LineArtist, LineStyle};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::panel::builder::PanelSpec;
use crate::plot::{DrawContext, PanelState};
use crate::source::registry::Source;

fn line_mut(axes: &mut Axes) -> LpuvisResult<&mut LineArtist> {
    let slot = axes.slot;
    match axes.artist_mut(0)? {
        Artist::Line(line) => Ok(line),
        _ => Err(LpuvisError::render(format!(
            "axes slot {slot} holds no line"
        ))),
    }
}

fn style_of(spec: &PanelSpec) -> LineStyle {
    spec.fmt
        .as_deref()
        .map(LineStyle::from_fmt)
        .unwrap_or_default()
}

/// Single channel: one point at `t = 0`. Several channels: channel index against value.
pub(crate) fn first_draw(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<PanelState> {
    let ids = spec.primary();
    let data = source.data();
    axes.decor.xlim = Some(ctx.limits.xlim);
    axes.decor.ylim = Some(ctx.limits.ylim);
    let (line, state) = match ids {
        [row] => {
            let initial = data.column(&[*row], 0)?[0];
            let line = LineArtist {
                x: vec![0.0],
                y: vec![initial],
                style: style_of(spec),
            };
            let state = PanelState::Rolling {
                row: *row,
                initial,
                buffer: Vec::new(),
            };
            (line, state)
        }
        _ => {
            let line = LineArtist {
                x: (0..ids.len()).map(|i| i as f64).collect(),
                y: data.column(ids, 0)?,
                style: style_of(spec),
            };
            (line, PanelState::Snapshot)
        }
    };
    axes.push(Artist::Line(line));
    Ok(state)
}

/// Append the current window to the rolling buffer and redraw the accumulated curve.
pub(crate) fn update_rolling(
    row: usize,
    initial: f64,
    buffer: &mut Vec<f64>,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let (start, end) = ctx.window();
    buffer.extend_from_slice(source.data().window(row, start, end)?);
    let line = line_mut(axes)?;
    line.y.clear();
    line.y.push(initial);
    line.y.extend_from_slice(buffer);
    line.x = (0..line.y.len()).map(|i| i as f64 * ctx.dt).collect();
    Ok(())
}

/// Replace y-data with the channel values at `t`.
pub(crate) fn update_snapshot(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let y = source.data().column(spec.primary(), ctx.t)?;
    line_mut(axes)?.y = y;
    Ok(())
}

/// Data rows of the selected neurons: index-map rows on measured sources, the ids themselves on
/// input sources. Neurons without a row are skipped.
pub(crate) fn resolve_rows(ids: &[usize], source: &Source) -> Vec<Option<usize>> {
    match source.index_map() {
        Some(map) => ids.iter().map(|&id| map.row(id as u64)).collect(),
        None => {
            let channels = source.data().channels();
            ids.iter()
                .map(|&id| (id < channels).then_some(id))
                .collect()
        }
    }
}

/// Empty rate curve on the full time axis.
pub(crate) fn first_draw_rate(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<PanelState> {
    let rows: Vec<usize> = resolve_rows(spec.primary(), source)
        .into_iter()
        .flatten()
        .collect();
    if rows.is_empty() {
        return Err(LpuvisError::configuration(format!(
            "rate panel '{}' selects no neuron with data",
            spec.title
        )));
    }
    axes.decor.xlim = Some((0.0, source.data().timesteps() as f64 * ctx.dt));
    axes.push(Artist::Line(LineArtist {
        x: Vec::new(),
        y: Vec::new(),
        style: style_of(spec),
    }));
    Ok(PanelState::Rate { rows })
}

/// Append `spikes / (neurons * window * dt)` for the current window at `x = t * dt`.
pub(crate) fn update_rate(
    rows: &[usize],
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let (start, end) = ctx.window();
    let mut spikes = 0usize;
    let mut len = 0usize;
    for &row in rows {
        let window = source.data().window(row, start, end)?;
        len = window.len();
        spikes += window.iter().filter(|&&v| v != 0.0).count();
    }
    if len == 0 {
        return Ok(());
    }
    let rate = spikes as f64 / (rows.len() * len) as f64 / ctx.dt;
    let line = line_mut(axes)?;
    line.x.push(ctx.t as f64 * ctx.dt);
    line.y.push(rate);
    Ok(())
}
