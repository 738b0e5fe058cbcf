use crate::foundation::core::TimeWindow;
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::panel::config::PanelConfig;
use crate::session::config::VisualizerConfig;
use crate::session::driver::Visualizer;
use crate::source::io::DataLoader;
use crate::source::registry::SourceDesc;
use std::path::{Path, PathBuf};

/// One data source of a project file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceEntry {
    /// Source name.
    #[serde(default)]
    pub name: Option<String>,
    /// Array file, relative to the project file.
    pub data: PathBuf,
    /// Topology file, relative to the project file.
    #[serde(default)]
    pub topology: Option<PathBuf>,
    /// Register as an input source.
    #[serde(default)]
    pub input: bool,
    /// Time-axis slice.
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

/// One panel of a project file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelEntry {
    /// Registered source id (`input_<name>` for input sources).
    pub source: String,
    /// Topology names selecting the channels.
    #[serde(default)]
    pub names: Vec<String>,
    /// Offset subtracted from matched node ids.
    #[serde(default)]
    pub shift: i64,
    /// Panel configuration.
    #[serde(flatten)]
    pub config: PanelConfig,
}

/// JSON project: configuration, sources and panels.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    /// Run-time configuration.
    pub config: VisualizerConfig,
    /// Sources in registration order.
    pub sources: Vec<SourceEntry>,
    /// Panels in the order they are added.
    pub panels: Vec<PanelEntry>,
}

impl ProjectFile {
    /// Parse a project from JSON text.
    pub fn from_json(text: &str) -> LpuvisResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| LpuvisError::configuration(format!("parse project JSON: {e}")))
    }

    /// Read and parse the project at `path`.
    pub fn read(path: &Path) -> LpuvisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LpuvisError::data(format!("read project '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Register every source and panel, resolving file references against `base_dir`.
    pub fn build(mut self, base_dir: &Path, loader: &dyn DataLoader) -> LpuvisResult<Visualizer> {
        self.config.font = self.config.font.map(|p| base_dir.join(p));
        let mut vis = Visualizer::new(self.config);
        for entry in self.sources {
            let data = loader.read_array(&base_dir.join(&entry.data))?;
            let desc = SourceDesc {
                name: entry.name,
                data,
                topology: None,
                topology_path: entry.topology.map(|p| base_dir.join(p)),
                window: entry.window,
                input: entry.input,
            };
            let id = vis.add_source(desc, loader)?;
            tracing::debug!(source = %id, data = %entry.data.display(), "loaded source");
        }
        for entry in self.panels {
            vis.add_panel(&entry.source, entry.config, &entry.names, entry.shift)?;
        }
        Ok(vis)
    }
}

/// Load the project at `path` into a ready-to-run [`Visualizer`].
pub fn load_project(path: &Path, loader: &dyn DataLoader) -> LpuvisResult<Visualizer> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    ProjectFile::read(path)?.build(base, loader)
}

#[cfg(test)]
#[path = "../../tests/unit/session/project.rs"]
mod tests;
