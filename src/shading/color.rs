use crate::foundation::error::{LpuvisError, LpuvisResult};

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default line color.
    pub const BLUE: Self = Self::new(31, 119, 180);

    /// Build from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit-range floats, clamping each channel.
    pub fn from_unit(rgb: [f64; 3]) -> Self {
        fn q(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(q(rgb[0]), q(rgb[1]), q(rgb[2]))
    }

    /// Gray level for a unit-range intensity.
    pub fn gray(v: f64) -> Self {
        Self::from_unit([v, v, v])
    }

    /// Parse a single-letter code (`b g r c m y k w`), a basic color name or `#rrggbb`.
    pub fn parse(s: &str) -> LpuvisResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6
                && let Ok(v) = u32::from_str_radix(hex, 16)
            {
                return Ok(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8));
            }
            return Err(LpuvisError::validation(format!("invalid hex color '{s}'")));
        }
        let c = match s.to_ascii_lowercase().as_str() {
            "b" | "blue" => Self::BLUE,
            "g" | "green" => Self::new(44, 160, 44),
            "r" | "red" => Self::new(214, 39, 40),
            "c" | "cyan" => Self::new(23, 190, 207),
            "m" | "magenta" => Self::new(227, 119, 194),
            "y" | "yellow" => Self::new(188, 189, 34),
            "k" | "black" => Self::BLACK,
            "w" | "white" => Self::WHITE,
            _ => return Err(LpuvisError::validation(format!("unknown color '{s}'"))),
        };
        Ok(c)
    }
}

/// Convert one HSV triple (all components in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u8 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Map a vector `(x, y)` to RGB: hue from its angle, value from its magnitude.
///
/// Hue is `(atan2(x, y) + pi) / (2 pi)`, saturation is fixed at 1 and the magnitude is clipped
/// to `[0, 1]`. NaN inputs yield NaN channels.
pub fn vector_to_rgb(x: f64, y: f64) -> [f64; 3] {
    if x.is_nan() || y.is_nan() {
        return [f64::NAN; 3];
    }
    let v = (x * x + y * y).sqrt().min(1.0);
    let h = (x.atan2(y) + std::f64::consts::PI) / (2.0 * std::f64::consts::PI);
    hsv_to_rgb(h, 1.0, v)
}

#[cfg(test)]
#[path = "../../tests/unit/shading/color.rs"]
mod tests;
