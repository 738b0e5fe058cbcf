use crate::foundation::error::{LpuvisError, LpuvisResult};
use std::str::FromStr;

/// Resolved plot kind of a panel.
///
/// Parsed once when the panel is built; per-tick updates dispatch on this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// Arrow field from two reshaped channel groups.
    VectorField,
    /// Color image: hue from the angle, value from the magnitude of two channel groups.
    HueMagnitude,
    /// Grayscale image of one reshaped channel group.
    Image,
    /// Line plot of one or more channels.
    Waveform,
    /// Spike raster with one row per neuron.
    Raster,
    /// Population firing rate over time.
    Rate,
    /// Nearest-neighbour projection onto a 3-D hemisphere.
    Dome,
}

impl PlotKind {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::VectorField => "vector-field",
            PlotKind::HueMagnitude => "hue-magnitude",
            PlotKind::Image => "single-channel-image",
            PlotKind::Waveform => "waveform",
            PlotKind::Raster => "event-raster",
            PlotKind::Rate => "rate",
            PlotKind::Dome => "spherical-dome",
        }
    }

    /// Exact number of channel groups the kind needs, when it is fixed.
    pub fn required_groups(self) -> Option<usize> {
        match self {
            PlotKind::VectorField | PlotKind::HueMagnitude => Some(2),
            PlotKind::Image => Some(1),
            _ => None,
        }
    }

    /// Return `true` for kinds drawn from a 2-D reshape of their channels.
    pub fn is_reshaped(self) -> bool {
        matches!(
            self,
            PlotKind::VectorField | PlotKind::HueMagnitude | PlotKind::Image
        )
    }
}

impl FromStr for PlotKind {
    type Err = LpuvisError;

    fn from_str(s: &str) -> LpuvisResult<Self> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "quiver" | "vector-field" => PlotKind::VectorField,
            "hsv" | "hue-magnitude" => PlotKind::HueMagnitude,
            "image" | "single-channel-image" => PlotKind::Image,
            "waveform" => PlotKind::Waveform,
            "raster" | "event-raster" => PlotKind::Raster,
            "rate" => PlotKind::Rate,
            "dome" | "spherical-dome" => PlotKind::Dome,
            _ => {
                return Err(LpuvisError::configuration(format!(
                    "unsupported plot kind '{s}'"
                )));
            }
        };
        Ok(kind)
    }
}

impl std::fmt::Display for PlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
