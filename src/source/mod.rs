//! Source registry: per-source time series, optional topology and the spiking index map.

/// Spiking id -> data row mapping.
pub mod index_map;
/// Data-access collaborator (`DataLoader`) and its JSON implementation.
pub mod io;
/// Registered sources and the global time bound.
pub mod registry;
/// Node-attributed neuron descriptions.
pub mod topology;
