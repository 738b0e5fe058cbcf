use crate::foundation::error::{LpuvisError, LpuvisResult};
use std::collections::HashMap;

/// Attributes of one neuron in a source's topology.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeAttrs {
    /// Integer node identifier.
    pub id: u64,
    /// Whether the neuron emits spikes (and therefore owns a row in spike output).
    pub spiking: bool,
    /// Optional name used for name-based channel lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the node receives external input.
    #[serde(default, rename = "extern")]
    pub external: bool,
    /// Co-latitude in radians, used by dome projections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in radians, used by dome projections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
}

impl NodeAttrs {
    /// A node with only the required attributes set.
    pub fn new(id: u64, spiking: bool) -> Self {
        Self {
            id,
            spiking,
            name: None,
            external: false,
            lat: None,
            long: None,
        }
    }

    /// Set the node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the angular position `(lat, long)` in radians.
    pub fn with_position(mut self, lat: f64, long: f64) -> Self {
        self.lat = Some(lat);
        self.long = Some(long);
        self
    }

    /// Mark the node as an external-input node.
    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// Angular position, or a data error naming the missing attribute.
    pub fn position(&self) -> LpuvisResult<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Ok((lat, long)),
            _ => Err(LpuvisError::data(format!(
                "node {} has no 'lat'/'long' attributes",
                self.id
            ))),
        }
    }
}

#[derive(serde::Deserialize)]
struct TopologyDef {
    nodes: Vec<NodeAttrs>,
}

/// Node-attributed description of one source's neurons.
///
/// Nodes are kept in ascending id order.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(try_from = "TopologyDef")]
pub struct Topology {
    nodes: Vec<NodeAttrs>,
    by_id: HashMap<u64, usize>,
}

impl TryFrom<TopologyDef> for Topology {
    type Error = LpuvisError;

    fn try_from(def: TopologyDef) -> Result<Self, Self::Error> {
        Self::new(def.nodes)
    }
}

impl Topology {
    /// Build a topology, rejecting duplicate node ids.
    pub fn new(mut nodes: Vec<NodeAttrs>) -> LpuvisResult<Self> {
        nodes.sort_by_key(|n| n.id);
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if by_id.insert(n.id, i).is_some() {
                return Err(LpuvisError::validation(format!(
                    "duplicate topology node id {}",
                    n.id
                )));
            }
        }
        Ok(Self { nodes, by_id })
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> &[NodeAttrs] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when the topology has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: u64) -> Option<&NodeAttrs> {
        self.by_id.get(&id).map(|&i| &self.nodes[i])
    }

    /// Ids of all spiking nodes, ascending.
    pub fn spiking_ids(&self) -> Vec<u64> {
        self.nodes
            .iter()
            .filter(|n| n.spiking)
            .map(|n| n.id)
            .collect()
    }

    /// Ids of nodes whose `name` equals `name`, ascending.
    pub fn ids_named(&self, name: &str) -> Vec<u64> {
        self.nodes
            .iter()
            .filter(|n| n.name.as_deref() == Some(name))
            .map(|n| n.id)
            .collect()
    }

    /// External-input nodes, ascending by id.
    pub fn external_nodes(&self) -> impl Iterator<Item = &NodeAttrs> {
        self.nodes.iter().filter(|n| n.external)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/topology.rs"]
mod tests;
