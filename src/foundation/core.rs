use crate::foundation::error::{LpuvisError, LpuvisResult};

pub use kurbo::{Point, Rect};

/// 0-based index of a frame submitted to a sink.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> LpuvisResult<Self> {
        if den == 0 {
            return Err(LpuvisError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LpuvisError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Channel-major numeric matrix of shape `[channels, timesteps]`.
///
/// Row `i` holds the full time series of channel `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    channels: usize,
    timesteps: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from a flat channel-major buffer.
    pub fn from_vec(channels: usize, timesteps: usize, data: Vec<f64>) -> LpuvisResult<Self> {
        let expected = channels.checked_mul(timesteps).ok_or_else(|| {
            LpuvisError::validation("matrix dimensions overflow usize")
        })?;
        if data.len() != expected {
            return Err(LpuvisError::validation(format!(
                "matrix buffer has {} values, expected {channels}x{timesteps}",
                data.len()
            )));
        }
        Ok(Self {
            channels,
            timesteps,
            data,
        })
    }

    /// Build a matrix from one `Vec` per channel. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> LpuvisResult<Self> {
        let channels = rows.len();
        let timesteps = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(channels * timesteps);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != timesteps {
                return Err(LpuvisError::validation(format!(
                    "ragged matrix: row {i} has {} timesteps, expected {timesteps}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            channels,
            timesteps,
            data,
        })
    }

    /// Number of channels (rows).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of timesteps (columns).
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// Value at `(channel, t)`, if in range.
    pub fn get(&self, channel: usize, t: usize) -> Option<f64> {
        if channel >= self.channels || t >= self.timesteps {
            return None;
        }
        self.data.get(channel * self.timesteps + t).copied()
    }

    /// Full time series of `channel`.
    pub fn row(&self, channel: usize) -> LpuvisResult<&[f64]> {
        if channel >= self.channels {
            return Err(self.channel_out_of_range(channel));
        }
        let start = channel * self.timesteps;
        Ok(&self.data[start..start + self.timesteps])
    }

    /// Samples of `channel` over `[start, end)`, with `end` clamped to the series length.
    pub fn window(&self, channel: usize, start: usize, end: usize) -> LpuvisResult<&[f64]> {
        let row = self.row(channel)?;
        let end = end.min(row.len());
        let start = start.min(end);
        Ok(&row[start..end])
    }

    /// Values of `channels` at the single timestep `t`.
    ///
    /// `t` past the end of the series is clamped to the last timestep.
    pub fn column(&self, channels: &[usize], t: usize) -> LpuvisResult<Vec<f64>> {
        if self.timesteps == 0 {
            return Err(LpuvisError::validation("matrix has no timesteps"));
        }
        let t = t.min(self.timesteps - 1);
        channels
            .iter()
            .map(|&ch| {
                self.get(ch, t)
                    .ok_or_else(|| self.channel_out_of_range(ch))
            })
            .collect()
    }

    /// Minimum and maximum over `channels`, considering timesteps from `from` onwards.
    pub fn min_max(&self, channels: &[usize], from: usize) -> LpuvisResult<Option<(f64, f64)>> {
        let mut acc: Option<(f64, f64)> = None;
        for &ch in channels {
            for &v in self.window(ch, from, self.timesteps)? {
                if v.is_nan() {
                    continue;
                }
                acc = Some(match acc {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }
        }
        Ok(acc)
    }

    /// Select timesteps according to `window`, producing a new matrix.
    pub fn slice_time(&self, window: &TimeWindow) -> LpuvisResult<Self> {
        let cols = window.indices(self.timesteps)?;
        let mut data = Vec::with_capacity(self.channels * cols.len());
        for ch in 0..self.channels {
            let row = self.row(ch)?;
            data.extend(cols.iter().map(|&t| row[t]));
        }
        Self::from_vec(self.channels, cols.len(), data)
    }

    fn channel_out_of_range(&self, channel: usize) -> LpuvisError {
        LpuvisError::validation(format!(
            "channel {channel} out of range for matrix with {} channels",
            self.channels
        ))
    }
}

/// Strided time-axis slice `[start, end)` applied once when a source is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    /// First selected timestep.
    #[serde(default)]
    pub start: usize,
    /// Exclusive end; `None` runs to the end of the series.
    #[serde(default)]
    pub end: Option<usize>,
    /// Stride between selected timesteps, must be non-zero.
    #[serde(default = "default_step")]
    pub step: usize,
}

fn default_step() -> usize {
    1
}

impl TimeWindow {
    /// Contiguous window `[start, end)`.
    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
            step: 1,
        }
    }

    /// Resolve the selected timestep indices against a series of length `len`.
    pub fn indices(&self, len: usize) -> LpuvisResult<Vec<usize>> {
        if self.step == 0 {
            return Err(LpuvisError::validation("time window step must be non-zero"));
        }
        let end = self.end.unwrap_or(len).min(len);
        if self.start > end {
            return Err(LpuvisError::validation(format!(
                "time window start {} is past its end {end}",
                self.start
            )));
        }
        Ok((self.start..end).step_by(self.step).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
