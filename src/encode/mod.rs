//! Frame sinks.
//!
//! Sinks consume rendered frames in submission order and are driven by
//! [`crate::session::driver::Visualizer::run_with`].

/// Video output through an external `ffmpeg`/`avconv` process.
pub mod ffmpeg;
/// Live preview written to an image file, paced to the frame rate.
pub mod preview;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
/// On-screen live window built on `eframe`.
#[cfg(feature = "window")]
pub mod window;
