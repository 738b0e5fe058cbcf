use super::*;

fn close(a: [f64; 3], b: [f64; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn hsv_primaries() {
    assert!(close(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]));
    assert!(close(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0.0, 1.0, 0.0]));
    assert!(close(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0.0, 0.0, 1.0]));
    assert!(close(hsv_to_rgb(0.5, 0.0, 0.25), [0.25, 0.25, 0.25]));
}

#[test]
fn vector_magnitude_sets_value() {
    // x = 0, y = -0.5 -> atan2(0, -0.5) = pi -> hue 1.0 (red), value 0.5.
    assert!(close(vector_to_rgb(0.0, -0.5), [0.5, 0.0, 0.0]));
    // zero vector is black regardless of hue.
    assert!(close(vector_to_rgb(0.0, 0.0), [0.0, 0.0, 0.0]));
    // magnitude is clipped to 1.
    let c = vector_to_rgb(3.0, 4.0);
    assert!(c.iter().cloned().fold(0.0, f64::max) <= 1.0);
}

#[test]
fn vector_nan_propagates() {
    assert!(vector_to_rgb(f64::NAN, 0.0)[0].is_nan());
}

#[test]
fn color_parsing() {
    assert_eq!(Rgb8::parse("k").unwrap(), Rgb8::BLACK);
    assert_eq!(Rgb8::parse("White").unwrap(), Rgb8::WHITE);
    assert_eq!(Rgb8::parse("#102030").unwrap(), Rgb8::new(16, 32, 48));
    assert!(Rgb8::parse("#12").is_err());
    assert!(Rgb8::parse("chartreuse").is_err());
}

#[test]
fn unit_conversion_clamps() {
    assert_eq!(Rgb8::from_unit([2.0, -1.0, 0.5]), Rgb8::new(255, 0, 128));
    assert_eq!(Rgb8::gray(1.0), Rgb8::WHITE);
}
