use crate::foundation::core::Matrix;
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::source::topology::Topology;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Data-access collaborator used to resolve file references into arrays and topologies.
pub trait DataLoader {
    /// Read a `channels x timesteps` numeric array.
    fn read_array(&self, path: &Path) -> LpuvisResult<Matrix>;
    /// Read a node-attributed topology.
    fn read_topology(&self, path: &Path) -> LpuvisResult<Topology>;
}

/// Loader for JSON files.
///
/// Arrays are `[[f64]]` in channel-major order; topologies are `{"nodes": [...]}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Parse an array from a JSON reader.
    pub fn array_from_reader<R: std::io::Read>(r: R) -> LpuvisResult<Matrix> {
        let rows: Vec<Vec<f64>> = serde_json::from_reader(r)
            .map_err(|e| LpuvisError::data(format!("parse array JSON: {e}")))?;
        Matrix::from_rows(rows)
    }

    /// Parse a topology from a JSON reader.
    pub fn topology_from_reader<R: std::io::Read>(r: R) -> LpuvisResult<Topology> {
        serde_json::from_reader(r)
            .map_err(|e| LpuvisError::data(format!("parse topology JSON: {e}")))
    }
}

impl DataLoader for JsonLoader {
    fn read_array(&self, path: &Path) -> LpuvisResult<Matrix> {
        Self::array_from_reader(open(path, "array")?)
    }

    fn read_topology(&self, path: &Path) -> LpuvisResult<Topology> {
        Self::topology_from_reader(open(path, "topology")?)
    }
}

fn open(path: &Path, what: &str) -> LpuvisResult<BufReader<File>> {
    let f = File::open(path)
        .map_err(|e| LpuvisError::data(format!("open {what} '{}': {e}", path.display())))?;
    Ok(BufReader::new(f))
}

#[cfg(test)]
#[path = "../../tests/unit/source/io.rs"]
mod tests;
