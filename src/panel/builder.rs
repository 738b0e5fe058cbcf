use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::foundation::math::near_square_shape;
use crate::panel::config::{NormSpec, PanelConfig};
use crate::panel::kind::PlotKind;
use crate::source::registry::{INPUT_PREFIX, Source, SourceRegistry};
use crate::style::{StyleOptions, log_unknown_options};

/// A fully resolved panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    /// Owning source id.
    pub source: String,
    /// Plot kind.
    pub kind: PlotKind,
    /// Channel groups. Image-like and waveform kinds index data rows; raster and rate kinds on
    /// measured sources hold node ids resolved through the index map.
    pub groups: Vec<Vec<usize>>,
    /// Reshape target for image-like kinds.
    pub shape: Option<(usize, usize)>,
    /// Title.
    pub title: String,
    /// Transpose single-channel images.
    pub transpose: bool,
    /// Dome normalization; `None` uses the fixed default range.
    pub norm: Option<NormSpec>,
    /// Waveform format string.
    pub fmt: Option<String>,
    /// Style options.
    pub style: StyleOptions,
}

impl PanelSpec {
    /// First channel group.
    pub fn primary(&self) -> &[usize] {
        self.groups.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Resolve `config` for the panel of `source_id`.
///
/// Channel groups come from `config.ids` when present. Otherwise input sources select every
/// channel and measured sources resolve each of `names` through the topology, subtracting
/// `shift` from every matching node id.
pub fn build_panel(
    registry: &SourceRegistry,
    source_id: &str,
    config: PanelConfig,
    names: &[String],
    shift: i64,
) -> LpuvisResult<PanelSpec> {
    let source = registry.source(source_id)?;
    let PanelConfig {
        kind,
        ids,
        shape,
        title,
        transpose,
        norm,
        fmt,
        style,
        extra,
    } = config;
    log_unknown_options(source_id, &extra);

    let groups = match ids {
        Some(ids) => ids,
        None if source.is_input() => vec![(0..source.data().channels()).collect()],
        None => resolve_names(source, names, shift)?,
    };
    if groups.is_empty() || groups.iter().any(Vec::is_empty) {
        return Err(LpuvisError::configuration(format!(
            "panel on '{source_id}' selects no channels"
        )));
    }

    let kind = match kind {
        Some(k) => k.parse::<PlotKind>()?,
        None => infer_kind(source, &groups)?,
    };
    if let Some(n) = kind.required_groups()
        && groups.len() != n
    {
        return Err(LpuvisError::configuration(format!(
            "{kind} panel on '{source_id}' needs {n} id group(s), got {}",
            groups.len()
        )));
    }

    let shape = if kind.is_reshaped() {
        Some(match shape {
            Some([r, c]) => (r, c),
            None => near_square_shape(groups[0].len()),
        })
    } else {
        None
    };

    let title = title.unwrap_or_else(|| default_title(source_id, names));
    tracing::debug!(
        source = source_id,
        %kind,
        groups = groups.len(),
        channels = groups[0].len(),
        ?shape,
        %title,
        "resolved panel"
    );

    Ok(PanelSpec {
        source: source_id.to_owned(),
        kind,
        groups,
        shape,
        title,
        transpose,
        norm,
        fmt,
        style,
    })
}

fn resolve_names(source: &Source, names: &[String], shift: i64) -> LpuvisResult<Vec<Vec<usize>>> {
    if names.is_empty() {
        return Err(LpuvisError::configuration(format!(
            "panel on '{}' needs explicit ids or neuron names",
            source.id()
        )));
    }
    let topology = source.require_topology("name lookup")?;
    names
        .iter()
        .map(|name| {
            topology
                .ids_named(name)
                .into_iter()
                .map(|id| {
                    let shifted = i64::try_from(id).unwrap_or(i64::MAX).saturating_sub(shift);
                    usize::try_from(shifted).map_err(|_| {
                        LpuvisError::configuration(format!(
                            "node {id} named '{name}' shifted by {shift} is negative"
                        ))
                    })
                })
                .collect::<LpuvisResult<Vec<usize>>>()
        })
        .collect()
}

fn infer_kind(source: &Source, groups: &[Vec<usize>]) -> LpuvisResult<PlotKind> {
    if source.is_input() {
        return Ok(PlotKind::Image);
    }
    let topology = source.require_topology("plot kind inference")?;
    let first = groups[0][0];
    let node = topology.node(first as u64).ok_or_else(|| {
        LpuvisError::configuration(format!(
            "node {first} is not part of the topology of '{}'",
            source.id()
        ))
    })?;
    Ok(if node.spiking {
        PlotKind::Raster
    } else {
        PlotKind::Image
    })
}

fn default_title(source_id: &str, names: &[String]) -> String {
    match names {
        [name] if !name.is_empty() => format!("{source_id} - {name}"),
        _ => match source_id.strip_prefix(INPUT_PREFIX) {
            Some(suffix) => format!("{suffix} - Input"),
            None => source_id.to_owned(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/builder.rs"]
mod tests;
