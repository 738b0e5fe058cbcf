use super::*;
use crate::figure::{Colormap, LineArtist, LineStyle};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn cell_rect_is_row_major() {
    let fig = Figure::subplots(2, 2, (1.0, 1.0), 10.0);
    assert_eq!(cell_rect(&fig, 3, 100.0, 100.0), Rect::new(50.0, 50.0, 100.0, 100.0));
    assert_eq!(cell_rect(&fig, 1, 100.0, 100.0), Rect::new(50.0, 0.0, 100.0, 50.0));
}

#[test]
fn suptitle_reserves_a_bottom_band() {
    let mut fig = Figure::subplots(1, 1, (1.0, 1.0), 10.0);
    fig.suptitle = Some(crate::figure::TextLabel::bold("run", 11.0));
    let cell = cell_rect(&fig, 0, 100.0, 100.0);
    assert!(approx(cell.y1, 94.0));
}

#[test]
fn suptitle_band_lies_below_the_cells() {
    let band = suptitle_rect(100.0, 100.0);
    assert!(approx(band.y0, 94.0));
    assert!(approx(band.y1, 100.0));
    assert!(approx(band.width(), 100.0));
}

#[test]
fn plot_rect_insets_the_cell() {
    let r = plot_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(approx(r.x0, 10.0));
    assert!(approx(r.y0, 10.0));
    assert!(approx(r.x1, 96.0));
    assert!(approx(r.y1, 90.0));
}

#[test]
fn data_transform_flips_y() {
    let tr = DataTransform::new((0.0, 10.0), (0.0, 1.0), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(tr.apply(0.0, 0.0), Point::new(0.0, 50.0));
    assert_eq!(tr.apply(10.0, 1.0), Point::new(100.0, 0.0));
    assert_eq!(tr.apply(5.0, 0.5), Point::new(50.0, 25.0));
}

#[test]
fn clip_segment_trims_to_box() {
    let (a, b) = clip_segment((-1.0, 0.5), (2.0, 0.5), (0.0, 1.0), (0.0, 1.0)).unwrap();
    assert!(approx(a.0, 0.0) && approx(a.1, 0.5));
    assert!(approx(b.0, 1.0) && approx(b.1, 0.5));
}

#[test]
fn clip_segment_rejects_outside_and_non_finite() {
    assert!(clip_segment((2.0, 2.0), (3.0, 3.0), (0.0, 1.0), (0.0, 1.0)).is_none());
    assert!(clip_segment((0.5, f64::NAN), (0.5, 0.5), (0.0, 1.0), (0.0, 1.0)).is_none());
}

#[test]
fn clip_segment_accepts_reversed_limits() {
    let clipped = clip_segment((0.5, 0.5), (0.6, 0.6), (1.0, 0.0), (1.0, 0.0));
    assert_eq!(clipped, Some(((0.5, 0.5), (0.6, 0.6))));
}

#[test]
fn data_limits_prefers_decor_and_widens_flat_extents() {
    let mut fig = Figure::subplots(1, 1, (1.0, 1.0), 10.0);
    let axes = fig.axes_mut(0).unwrap();
    axes.push(Artist::Line(LineArtist {
        x: vec![1.0, 3.0],
        y: vec![2.0, 2.0],
        style: LineStyle::default(),
    }));
    assert_eq!(data_limits(axes), ((1.0, 3.0), (1.5, 2.5)));

    axes.decor.ylim = Some((-1.0, 1.0));
    assert_eq!(data_limits(axes), ((1.0, 3.0), (-1.0, 1.0)));
}

#[test]
fn data_limits_of_empty_axes_is_unit_box() {
    let fig = Figure::subplots(1, 1, (1.0, 1.0), 10.0);
    assert_eq!(data_limits(&fig.axes()[0]), ((0.0, 1.0), (0.0, 1.0)));
}

#[test]
fn scalar_image_cells_map_through_clim() {
    let pixels = ImagePixels::Scalar {
        values: vec![0.0, f64::NAN, 1.0, 0.5],
        clim: (0.0, 1.0),
        cmap: Colormap::Gray,
    };
    assert_eq!(image_cell_rgb(&pixels, 0), Some([0.0, 0.0, 0.0]));
    assert_eq!(image_cell_rgb(&pixels, 1), None);
    assert_eq!(image_cell_rgb(&pixels, 2), Some([1.0, 1.0, 1.0]));
    assert_eq!(image_cell_rgb(&pixels, 3), Some([0.5, 0.5, 0.5]));
    assert_eq!(image_cell_rgb(&pixels, 9), None);
}

#[test]
fn image_row_zero_is_at_the_top() {
    let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
    assert_eq!(image_cell(rect, 2, 4, 0, 0), Rect::new(0.0, 0.0, 5.0, 5.0));
    assert_eq!(image_cell(rect, 2, 4, 1, 3), Rect::new(15.0, 5.0, 20.0, 10.0));
}

#[test]
fn camera_keeps_z_up_and_toward_viewer() {
    let (x, y, depth) = OrthoCamera::default().project([0.0, 0.0, 1.0]);
    assert!(approx(x, 0.0));
    assert!(approx(y, 30f64.to_radians().cos()));
    assert!(approx(depth, 0.5));
}

#[test]
fn square_viewport_is_centered() {
    let v = square_viewport(Rect::new(0.0, 0.0, 200.0, 100.0), 0.0);
    assert_eq!(v, Rect::new(50.0, 0.0, 150.0, 100.0));
}
