use super::*;

fn sample() -> Matrix {
    Matrix::from_rows(vec![
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![10.0, 11.0, 12.0, 13.0, 14.0],
    ])
    .unwrap()
}

#[test]
fn from_rows_rejects_ragged_input() {
    let err = Matrix::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).unwrap_err();
    assert!(err.to_string().contains("ragged"));
}

#[test]
fn from_vec_checks_buffer_length() {
    assert!(Matrix::from_vec(2, 3, vec![0.0; 6]).is_ok());
    assert!(Matrix::from_vec(2, 3, vec![0.0; 5]).is_err());
}

#[test]
fn column_clamps_time_and_rejects_bad_channels() {
    let m = sample();
    assert_eq!(m.column(&[1, 0], 2).unwrap(), vec![12.0, 2.0]);
    assert_eq!(m.column(&[0], 99).unwrap(), vec![4.0]);
    assert!(m.column(&[2], 0).is_err());
}

#[test]
fn window_clamps_end() {
    let m = sample();
    assert_eq!(m.window(0, 3, 10).unwrap(), &[3.0, 4.0]);
    assert!(m.window(0, 7, 10).unwrap().is_empty());
}

#[test]
fn strided_slice_selects_expected_columns() {
    let m = sample();
    let w = TimeWindow {
        start: 1,
        end: None,
        step: 2,
    };
    let s = m.slice_time(&w).unwrap();
    assert_eq!(s.timesteps(), 2);
    assert_eq!(s.row(0).unwrap(), &[1.0, 3.0]);
    assert_eq!(s.row(1).unwrap(), &[11.0, 13.0]);
}

#[test]
fn time_window_validation() {
    assert!(
        TimeWindow {
            start: 0,
            end: None,
            step: 0
        }
        .indices(4)
        .is_err()
    );
    assert!(TimeWindow::range(5, 3).indices(10).is_err());
    assert_eq!(TimeWindow::range(2, 100).indices(4).unwrap(), vec![2, 3]);
}

#[test]
fn min_max_skips_leading_steps() {
    let m = sample();
    assert_eq!(m.min_max(&[0, 1], 3).unwrap(), Some((3.0, 14.0)));
    assert_eq!(m.min_max(&[0], 0).unwrap(), Some((0.0, 4.0)));
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(5, 0).is_err());
    assert!((Fps::new(5, 1).unwrap().frame_duration_secs() - 0.2).abs() < 1e-12);
}
