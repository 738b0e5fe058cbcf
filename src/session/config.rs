use crate::encode::ffmpeg::EncoderPreference;
use crate::foundation::core::Fps;
use crate::foundation::error::LpuvisResult;
use crate::plot::PlotLimits;
use std::path::PathBuf;

/// Run-time configuration of a [`crate::session::driver::Visualizer`].
///
/// Every field has a default, so a project file may omit any of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Video output path; absent selects live preview.
    pub out_path: Option<PathBuf>,
    /// Frames per second.
    pub fps: u32,
    /// Video codec.
    pub codec: String,
    /// Figure size in inches.
    pub figsize: (f64, f64),
    /// Base font size in points.
    pub fontsize: f64,
    /// X limits of waveform panels.
    pub xlim: [f64; 2],
    /// Y limits of waveform panels.
    pub ylim: [f64; 2],
    /// Intensity limits of single-channel images.
    pub imlim: [f64; 2],
    /// Timesteps advanced per frame; 0 renders a single terminal frame.
    pub update_interval: usize,
    /// Seconds per timestep.
    pub dt: f64,
    /// Figure title.
    pub title: Option<String>,
    /// Grid rows; 0 computes the grid from the panel count.
    pub rows: usize,
    /// Grid columns; 0 computes the grid from the panel count.
    pub cols: usize,
    /// Encoder binary preference.
    pub encoder: EncoderPreference,
    /// Resolution of video frames.
    pub video_dpi: f64,
    /// Overwrite an existing video file.
    pub overwrite: bool,
    /// Font file for labels; absent uses the first system font found.
    pub font: Option<PathBuf>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            out_path: None,
            fps: 5,
            codec: "libtheora".to_string(),
            figsize: (16.0, 9.0),
            fontsize: 18.0,
            xlim: [0.0, 1.0],
            ylim: [-1.0, 1.0],
            imlim: [-1.0, 1.0],
            update_interval: 50,
            dt: 1.0,
            title: None,
            rows: 0,
            cols: 0,
            encoder: EncoderPreference::Auto,
            video_dpi: 80.0,
            overwrite: true,
            font: None,
        }
    }
}

impl VisualizerConfig {
    /// Validated frame rate.
    pub fn frame_rate(&self) -> LpuvisResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Engine-wide limits handed to the first draw.
    pub fn limits(&self) -> PlotLimits {
        PlotLimits {
            xlim: (self.xlim[0], self.xlim[1]),
            ylim: (self.ylim[0], self.ylim[1]),
            imlim: (self.imlim[0], self.imlim[1]),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
