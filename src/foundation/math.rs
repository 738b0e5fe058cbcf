/// Smallest `r` with `r * r >= n`.
pub(crate) fn ceil_sqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt().ceil() as usize;
    while r * r < n {
        r += 1;
    }
    while r > 0 && (r - 1) * (r - 1) >= n {
        r -= 1;
    }
    r
}

/// `ceil(a / b)` for `b > 0`.
pub(crate) fn ceil_div(a: usize, b: usize) -> usize {
    a.div_ceil(b)
}

/// Near-square `(rows, cols)` reshape target for `n` channels:
/// `(ceil(sqrt(n)), ceil(n / ceil(sqrt(n))))`.
///
/// The product is not guaranteed to equal `n`.
pub fn near_square_shape(n: usize) -> (usize, usize) {
    let rows = ceil_sqrt(n).max(1);
    (rows, ceil_div(n, rows))
}

/// `n` evenly spaced samples over `[start, stop]`, endpoints included.
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
