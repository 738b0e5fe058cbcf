/// Linear map from `[vmin, vmax]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    /// Value mapped to 0.
    pub vmin: f64,
    /// Value mapped to 1.
    pub vmax: f64,
    /// Clip results into `[0, 1]`.
    pub clip: bool,
}

impl Normalize {
    /// Clipping normalization over `[vmin, vmax]`.
    pub fn clipped(vmin: f64, vmax: f64) -> Self {
        Self {
            vmin,
            vmax,
            clip: true,
        }
    }

    /// Normalize one value. A degenerate range maps everything to 0; NaN stays NaN.
    pub fn apply(&self, v: f64) -> f64 {
        if v.is_nan() {
            return v;
        }
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.0;
        }
        let n = (v - self.vmin) / span;
        if self.clip { n.clamp(0.0, 1.0) } else { n }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/norm.rs"]
mod tests;
