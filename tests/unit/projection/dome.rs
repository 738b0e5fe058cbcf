use super::*;

fn close(a: [f64; 3], b: [f64; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-12)
}

#[test]
fn default_grid_is_60_by_60() {
    let g = DomeGrid::default();
    assert_eq!(g.shape(), (60, 60));
    assert_eq!(g.sample_count(), 3600);
}

#[test]
fn first_row_is_the_pole_and_last_row_the_rim() {
    let g = DomeGrid::default();
    for col in 0..60 {
        assert!(close(g.point(0, col).unwrap(), [0.0, 0.0, 1.0]));
        assert!(g.point(59, col).unwrap()[2].abs() < 1e-12);
    }
    assert!(close(g.point(59, 0).unwrap(), [1.0, 0.0, 0.0]));
    assert!(close(g.point(59, 59).unwrap(), [1.0, 0.0, 0.0]));
    assert!(g.point(60, 0).is_none());
}

#[test]
fn cartesian_lies_on_unit_sphere() {
    for (lat, long) in [(0.3, 1.2), (1.5, -2.0), (0.0, 0.0)] {
        let [x, y, z] = cartesian(lat, long);
        assert!(((x * x + y * y + z * z) - 1.0).abs() < 1e-12);
    }
    assert!(close(
        cartesian(std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2),
        [0.0, 1.0, 0.0]
    ));
}
