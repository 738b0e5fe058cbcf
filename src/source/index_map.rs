use crate::source::topology::Topology;
use std::collections::BTreeMap;

/// Spiking neuron id -> row index in the companion data matrix.
///
/// Rows are assigned by sorting all spiking ids ascending, which is also the row order in which
/// the simulator writes spike output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexMap {
    rows: BTreeMap<u64, usize>,
}

impl IndexMap {
    /// Build from every node flagged spiking in `topology`.
    pub fn from_topology(topology: &Topology) -> Self {
        Self::from_ids(topology.spiking_ids())
    }

    /// Build from an arbitrary set of spiking ids.
    pub fn from_ids(mut ids: Vec<u64>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self {
            rows: ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect(),
        }
    }

    /// Row index of neuron `id`.
    pub fn row(&self, id: u64) -> Option<usize> {
        self.rows.get(&id).copied()
    }

    /// Smallest mapped id.
    pub fn min_id(&self) -> Option<u64> {
        self.rows.keys().next().copied()
    }

    /// Number of mapped neurons.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return `true` when no neuron is mapped.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(id, row)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.rows.iter().map(|(&id, &row)| (id, row))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/index_map.rs"]
mod tests;
