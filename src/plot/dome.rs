use crate::figure::{Artist, Axes, SurfaceArtist};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::panel::builder::PanelSpec;
use crate::panel::config::NormSpec;
use crate::plot::{DrawContext, PanelState};
use crate::projection::dome::cartesian;
use crate::projection::nearest::{NearestBasis, shade_rgba};
use crate::shading::norm::Normalize;
use crate::source::registry::Source;

/// Range used when a dome panel configures no normalization.
pub const DEFAULT_DOME_RANGE: (f64, f64) = (-70.0, 0.0);

/// Timesteps skipped by `"auto"` normalization on series longer than this.
pub const AUTO_NORM_SKIP: usize = 100;

/// Resolve the normalization of a dome panel over the rows it draws.
pub fn resolve_norm(
    norm: Option<&NormSpec>,
    source: &Source,
    rows: &[usize],
) -> LpuvisResult<Normalize> {
    let (lo, hi) = match norm {
        None => DEFAULT_DOME_RANGE,
        Some(NormSpec::Range([lo, hi])) => (*lo, *hi),
        Some(NormSpec::Keyword(_)) => {
            let data = source.data();
            let from = if data.timesteps() > AUTO_NORM_SKIP {
                AUTO_NORM_SKIP
            } else {
                0
            };
            data.min_max(rows, from)?.ok_or_else(|| {
                LpuvisError::data(format!(
                    "cannot auto-range dome panel on '{}': no finite samples",
                    source.id()
                ))
            })?
        }
    };
    Ok(Normalize::clipped(lo, hi))
}

/// Unit-sphere positions of the nodes feeding a dome panel.
///
/// Input sources place their external nodes in id order; measured sources place the selected
/// node ids.
pub fn node_positions(spec: &PanelSpec, source: &Source) -> LpuvisResult<Vec<[f64; 3]>> {
    let topology = source.require_topology("a dome panel")?;
    let positions = if source.is_input() {
        topology
            .external_nodes()
            .map(|n| n.position().map(|(lat, long)| cartesian(lat, long)))
            .collect::<LpuvisResult<Vec<_>>>()?
    } else {
        spec.primary()
            .iter()
            .map(|&id| {
                let node = topology.node(id as u64).ok_or_else(|| {
                    LpuvisError::data(format!(
                        "dome panel '{}' selects node {id}, absent from the topology",
                        spec.title
                    ))
                })?;
                node.position().map(|(lat, long)| cartesian(lat, long))
            })
            .collect::<LpuvisResult<Vec<_>>>()?
    };
    if positions.len() != spec.primary().len() {
        return Err(LpuvisError::validation(format!(
            "dome panel '{}' has {} node positions for {} channels",
            spec.title,
            positions.len(),
            spec.primary().len()
        )));
    }
    Ok(positions)
}

fn draw_surface(
    rows: &[usize],
    basis: &NearestBasis,
    norm: &Normalize,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let values = source.data().column(rows, ctx.t)?;
    let samples = basis.interpolate(&values)?;
    axes.push(Artist::Surface(SurfaceArtist {
        grid: ctx.dome.clone(),
        facecolors: shade_rgba(&samples, norm),
    }));
    axes.decor.hide_ticks();
    Ok(())
}

pub(crate) fn first_draw(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<PanelState> {
    let rows = spec.primary().to_vec();
    let norm = resolve_norm(spec.norm.as_ref(), source, &rows)?;
    let basis = NearestBasis::build(&ctx.dome, &node_positions(spec, source)?)?;
    draw_surface(&rows, &basis, &norm, source, axes, ctx)?;
    Ok(PanelState::Dome { rows, basis, norm })
}

/// Surfaces cannot be mutated in place: clear the axes and draw a new one.
pub(crate) fn update(
    rows: &[usize],
    basis: &NearestBasis,
    norm: &Normalize,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    axes.clear();
    draw_surface(rows, basis, norm, source, axes, ctx)
}
