//! Panel configuration and resolution into [`builder::PanelSpec`]s.

/// Panel resolution against the source registry.
pub mod builder;
/// Serializable per-panel configuration.
pub mod config;
/// Plot kinds.
pub mod kind;
