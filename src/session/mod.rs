//! Animation driver, run configuration and project files.

/// Run-time configuration.
pub mod config;
/// The animation driver.
pub mod driver;
/// JSON project files.
pub mod project;
