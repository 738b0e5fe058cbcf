use crate::foundation::core::{Matrix, TimeWindow};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::source::index_map::IndexMap;
use crate::source::io::DataLoader;
use crate::source::topology::Topology;
use std::path::PathBuf;

/// Prefix given to the identifiers of input sources.
pub const INPUT_PREFIX: &str = "input_";

/// Flavor of a registered source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Simulator output with a topology; rows correspond to spiking neurons.
    Measured,
    /// Externally driven stimulus channels.
    Input,
}

/// Registration request for one data source.
///
/// Exactly one of `topology` / `topology_path` may be set.
#[derive(Clone, Debug)]
pub struct SourceDesc {
    /// Source name; input sources are registered as `input_<name>`.
    pub name: Option<String>,
    /// `channels x timesteps` samples.
    pub data: Matrix,
    /// Topology given as an object.
    pub topology: Option<Topology>,
    /// Topology given as a file reference, resolved through a [`DataLoader`].
    pub topology_path: Option<PathBuf>,
    /// Optional time-axis slice applied once at registration.
    pub window: Option<TimeWindow>,
    /// Register as an input source even when a topology is supplied.
    pub input: bool,
}

impl SourceDesc {
    /// Describe a measured source with its topology.
    pub fn measured(name: impl Into<String>, data: Matrix, topology: Topology) -> Self {
        Self {
            name: Some(name.into()),
            data,
            topology: Some(topology),
            topology_path: None,
            window: None,
            input: false,
        }
    }

    /// Describe an input source.
    pub fn input(name: impl Into<String>, data: Matrix) -> Self {
        Self {
            name: Some(name.into()),
            data,
            topology: None,
            topology_path: None,
            window: None,
            input: true,
        }
    }

    /// Attach a time window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Attach a topology object.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Attach a topology file reference.
    pub fn with_topology_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.topology_path = Some(path.into());
        self
    }
}

/// One registered, immutable data source.
#[derive(Clone, Debug)]
pub struct Source {
    id: String,
    kind: SourceKind,
    data: Matrix,
    topology: Option<Topology>,
    index_map: Option<IndexMap>,
}

impl Source {
    /// Source identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Measured or input.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Return `true` for input sources.
    pub fn is_input(&self) -> bool {
        self.kind == SourceKind::Input
    }

    /// Windowed `channels x timesteps` samples.
    pub fn data(&self) -> &Matrix {
        &self.data
    }

    /// Topology, when one was supplied.
    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    /// Spiking id -> row map; present for measured sources only.
    pub fn index_map(&self) -> Option<&IndexMap> {
        self.index_map.as_ref()
    }

    /// Topology or a configuration error naming `purpose`.
    pub fn require_topology(&self, purpose: &str) -> LpuvisResult<&Topology> {
        self.topology.as_ref().ok_or_else(|| {
            LpuvisError::configuration(format!(
                "source '{}' has no topology, which {purpose} requires",
                self.id
            ))
        })
    }
}

/// Holds every registered source and the global time bound `maxt`.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    maxt: Option<usize>,
}

impl SourceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source and return its identifier.
    ///
    /// Updates `maxt` to the minimum timestep count over all registered sources.
    pub fn register(&mut self, desc: SourceDesc, loader: &dyn DataLoader) -> LpuvisResult<String> {
        let SourceDesc {
            name,
            data,
            topology,
            topology_path,
            window,
            input,
        } = desc;

        let topology = match (topology, topology_path) {
            (Some(_), Some(path)) => {
                return Err(LpuvisError::configuration(format!(
                    "topology object and topology file '{}' cannot both be set",
                    path.display()
                )));
            }
            (Some(t), None) => Some(t),
            (None, Some(path)) => Some(loader.read_topology(&path)?),
            (None, None) => None,
        };

        let kind = if topology.is_some() && !input {
            SourceKind::Measured
        } else {
            SourceKind::Input
        };
        let id = match (kind, name) {
            (SourceKind::Measured, Some(name)) => name,
            (SourceKind::Measured, None) => self.sources.len().to_string(),
            (SourceKind::Input, Some(name)) => format!("{INPUT_PREFIX}{name}"),
            (SourceKind::Input, None) => format!("{INPUT_PREFIX}{}", self.sources.len()),
        };
        if self.get(&id).is_some() {
            return Err(LpuvisError::configuration(format!(
                "source '{id}' is already registered"
            )));
        }

        let data = match window {
            Some(w) => data.slice_time(&w)?,
            None => data,
        };
        if data.channels() == 0 || data.timesteps() == 0 {
            return Err(LpuvisError::validation(format!(
                "source '{id}' has an empty {}x{} data matrix",
                data.channels(),
                data.timesteps()
            )));
        }

        let index_map = match (kind, topology.as_ref()) {
            (SourceKind::Measured, Some(t)) => Some(IndexMap::from_topology(t)),
            _ => None,
        };

        self.maxt = Some(match self.maxt {
            Some(m) => m.min(data.timesteps()),
            None => data.timesteps(),
        });
        tracing::debug!(
            source = %id,
            ?kind,
            channels = data.channels(),
            timesteps = data.timesteps(),
            maxt = ?self.maxt,
            "registered source"
        );

        self.sources.push(Source {
            id: id.clone(),
            kind,
            data,
            topology,
            index_map,
        });
        Ok(id)
    }

    /// Look up a source by id.
    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Look up a source by id, failing with a configuration error.
    pub fn source(&self, id: &str) -> LpuvisResult<&Source> {
        self.get(id)
            .ok_or_else(|| LpuvisError::configuration(format!("unknown source '{id}'")))
    }

    /// Minimum timestep count over all registered sources.
    pub fn maxt(&self) -> Option<usize> {
        self.maxt
    }

    /// Sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/registry.rs"]
mod tests;
