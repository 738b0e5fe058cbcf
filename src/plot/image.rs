use crate::figure::{Artist, Axes, Colormap, ImageArtist, ImagePixels, QuiverArtist};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::panel::builder::PanelSpec;
use crate::panel::kind::PlotKind;
use crate::plot::{DrawContext, PanelState};
use crate::shading::color::{Rgb8, vector_to_rgb};
use crate::source::registry::Source;

/// Lay `values` out row-major over `shape`.
///
/// Missing cells are NaN and surplus values are dropped. With `transpose` the result has shape
/// `(cols, rows)`.
pub fn reshape(values: &[f64], shape: (usize, usize), transpose: bool) -> (usize, usize, Vec<f64>) {
    let (rows, cols) = shape;
    let cell = |r: usize, c: usize| values.get(r * cols + c).copied().unwrap_or(f64::NAN);
    if transpose {
        let out = (0..cols)
            .flat_map(|c| (0..rows).map(move |r| (r, c)))
            .map(|(r, c)| cell(r, c))
            .collect();
        (cols, rows, out)
    } else {
        let out = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| cell(r, c))
            .collect();
        (rows, cols, out)
    }
}

fn shape_of(spec: &PanelSpec) -> LpuvisResult<(usize, usize)> {
    spec.shape.ok_or_else(|| {
        LpuvisError::configuration(format!("{} panel '{}' has no shape", spec.kind, spec.title))
    })
}

fn group(spec: &PanelSpec, i: usize) -> LpuvisResult<&[usize]> {
    spec.groups.get(i).map(Vec::as_slice).ok_or_else(|| {
        LpuvisError::configuration(format!(
            "{} panel '{}' is missing id group {i}",
            spec.kind, spec.title
        ))
    })
}

fn compute(spec: &PanelSpec, source: &Source, ctx: &DrawContext) -> LpuvisResult<Artist> {
    let shape = shape_of(spec)?;
    let data = source.data();
    let artist = match spec.kind {
        PlotKind::VectorField => {
            let (rows, cols, u) = reshape(&data.column(group(spec, 0)?, ctx.t)?, shape, false);
            let (_, _, v) = reshape(&data.column(group(spec, 1)?, ctx.t)?, shape, false);
            Artist::Quiver(QuiverArtist {
                rows,
                cols,
                u,
                v,
                color: Rgb8::BLACK,
            })
        }
        PlotKind::HueMagnitude => {
            let (rows, cols, x) = reshape(&data.column(group(spec, 0)?, ctx.t)?, shape, false);
            let (_, _, y) = reshape(&data.column(group(spec, 1)?, ctx.t)?, shape, false);
            let rgb = x
                .iter()
                .zip(y.iter())
                .map(|(&x, &y)| vector_to_rgb(x, y))
                .collect();
            Artist::Image(ImageArtist {
                rows,
                cols,
                pixels: ImagePixels::Rgb(rgb),
            })
        }
        PlotKind::Image => {
            let (rows, cols, values) =
                reshape(&data.column(group(spec, 0)?, ctx.t)?, shape, spec.transpose);
            Artist::Image(ImageArtist {
                rows,
                cols,
                pixels: ImagePixels::Scalar {
                    values,
                    clim: ctx.limits.imlim,
                    cmap: Colormap::Gray,
                },
            })
        }
        other => {
            return Err(LpuvisError::configuration(format!(
                "{other} is not an image-like plot kind"
            )));
        }
    };
    Ok(artist)
}

pub(crate) fn first_draw(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<PanelState> {
    axes.push(compute(spec, source, ctx)?);
    Ok(PanelState::Reshaped)
}

/// Replace the payload of the existing artist, keeping its color limits and colors.
pub(crate) fn update(
    spec: &PanelSpec,
    source: &Source,
    axes: &mut Axes,
    ctx: &DrawContext,
) -> LpuvisResult<()> {
    let next = compute(spec, source, ctx)?;
    match (axes.artist_mut(0)?, next) {
        (Artist::Quiver(q), Artist::Quiver(n)) => {
            q.u = n.u;
            q.v = n.v;
        }
        (
            Artist::Image(ImageArtist {
                pixels: ImagePixels::Scalar { values, .. },
                ..
            }),
            Artist::Image(ImageArtist {
                pixels: ImagePixels::Scalar { values: nv, .. },
                ..
            }),
        ) => *values = nv,
        (Artist::Image(img), Artist::Image(n)) => img.pixels = n.pixels,
        _ => {
            return Err(LpuvisError::render(format!(
                "panel '{}' lost its {} artist",
                spec.title, spec.kind
            )));
        }
    }
    Ok(())
}
