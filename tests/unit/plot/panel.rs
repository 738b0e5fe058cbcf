use super::*;
use crate::figure::{Artist, AxesProjection, ImagePixels};
use crate::foundation::core::Matrix;
use crate::foundation::error::LpuvisError;
use crate::panel::builder::build_panel;
use crate::panel::config::{NormKeyword, NormSpec, PanelConfig};
use crate::source::io::JsonLoader;
use crate::source::registry::{SourceDesc, SourceRegistry};
use crate::source::topology::{NodeAttrs, Topology};

fn ctx(t: usize, stride: usize) -> DrawContext {
    DrawContext {
        t,
        stride,
        dt: 1.0,
        limits: PlotLimits {
            xlim: (0.0, 1.0),
            ylim: (-1.0, 1.0),
            imlim: (-1.0, 1.0),
        },
        fontsize: 18.0,
        dome: Arc::new(DomeGrid::default()),
    }
}

fn ramp(channels: usize, timesteps: usize) -> Matrix {
    let data = (0..channels * timesteps).map(|i| i as f64).collect();
    Matrix::from_vec(channels, timesteps, data).unwrap()
}

fn input_registry(data: Matrix) -> SourceRegistry {
    let mut r = SourceRegistry::new();
    r.register(SourceDesc::input("in", data), &JsonLoader).unwrap();
    r
}

fn panel(r: &SourceRegistry, source: &str, cfg: PanelConfig, fig: &mut Figure) -> Panel {
    let spec = build_panel(r, source, cfg, &[], 0).unwrap();
    Panel::first_draw(spec, 0, r.source(source).unwrap(), fig, &ctx(0, 1)).unwrap()
}

#[test]
fn reshape_pads_and_transposes() {
    let (r, c, v) = image::reshape(&[1.0, 2.0, 3.0], (2, 2), false);
    assert_eq!((r, c), (2, 2));
    assert_eq!(&v[..3], &[1.0, 2.0, 3.0]);
    assert!(v[3].is_nan());

    let (r, c, v) = image::reshape(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], (2, 3), true);
    assert_eq!((r, c), (3, 2));
    assert_eq!(v, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
fn rolling_buffer_grows_by_stride_per_tick() {
    let r = input_registry(ramp(1, 40));
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let mut p = panel(&r, "input_in", PanelConfig::of_kind("waveform"), &mut fig);
    let source = r.source("input_in").unwrap();
    let stride = 5;
    let mut t = stride + 1;
    for k in 1..=6 {
        p.update(source, &mut fig, &ctx(t, stride)).unwrap();
        match p.state() {
            PanelState::Rolling { buffer, .. } => assert_eq!(buffer.len(), k * stride),
            other => panic!("unexpected state {other:?}"),
        }
        t += stride;
    }
    match &fig.axes_at(0).unwrap().artists[0] {
        Artist::Line(l) => {
            assert_eq!(l.y.len(), 1 + 6 * stride);
            assert_eq!(l.x.len(), l.y.len());
            assert_eq!(l.y[..3], [0.0, 1.0, 2.0]);
        }
        other => panic!("unexpected artist {other:?}"),
    }
}

#[test]
fn multi_channel_waveform_replaces_y() {
    let r = input_registry(ramp(3, 10));
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let mut p = panel(&r, "input_in", PanelConfig::of_kind("waveform"), &mut fig);
    assert_eq!(p.state(), &PanelState::Snapshot);
    p.update(r.source("input_in").unwrap(), &mut fig, &ctx(4, 3))
        .unwrap();
    match &fig.axes_at(0).unwrap().artists[0] {
        Artist::Line(l) => {
            assert_eq!(l.x, vec![0.0, 1.0, 2.0]);
            assert_eq!(l.y, vec![4.0, 14.0, 24.0]);
        }
        other => panic!("unexpected artist {other:?}"),
    }
}

#[test]
fn image_update_keeps_clim() {
    let r = input_registry(ramp(4, 3));
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let mut cfg = PanelConfig::of_kind("image");
    cfg.style.clim = Some([0.0, 12.0]);
    let mut p = panel(&r, "input_in", cfg, &mut fig);
    p.update(r.source("input_in").unwrap(), &mut fig, &ctx(2, 1))
        .unwrap();
    let axes = fig.axes_at(0).unwrap();
    assert!(!axes.decor.xticks && !axes.decor.yticks);
    match &axes.artists[0] {
        Artist::Image(img) => {
            assert_eq!((img.rows, img.cols), (2, 2));
            match &img.pixels {
                ImagePixels::Scalar { values, clim, .. } => {
                    assert_eq!(*clim, (0.0, 12.0));
                    assert_eq!(values, &vec![2.0, 5.0, 8.0, 11.0]);
                }
                other => panic!("unexpected pixels {other:?}"),
            }
        }
        other => panic!("unexpected artist {other:?}"),
    }
}

#[test]
fn hue_magnitude_draws_rgb() {
    let data = Matrix::from_rows(vec![vec![0.0], vec![0.0], vec![1.0], vec![0.0]]).unwrap();
    let r = input_registry(data);
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    panel(
        &r,
        "input_in",
        PanelConfig::of_kind("hsv").with_ids(vec![vec![0, 1], vec![2, 3]]),
        &mut fig,
    );
    match &fig.axes_at(0).unwrap().artists[0] {
        Artist::Image(img) => match &img.pixels {
            ImagePixels::Rgb(px) => {
                assert_eq!(px.len(), 2);
                assert_eq!(px[1], [0.0, 0.0, 0.0]);
                assert_eq!(px[0], [0.0, 1.0, 1.0]);
            }
            other => panic!("unexpected pixels {other:?}"),
        },
        other => panic!("unexpected artist {other:?}"),
    }
}

fn spiking_registry() -> SourceRegistry {
    let topo = Topology::new(vec![
        NodeAttrs::new(5, true),
        NodeAttrs::new(2, true),
        NodeAttrs::new(9, true),
        NodeAttrs::new(7, false),
    ])
    .unwrap();
    let data = Matrix::from_rows(vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 1.0],
    ])
    .unwrap();
    let mut r = SourceRegistry::new();
    r.register(SourceDesc::measured("lpu", data, topo), &JsonLoader)
        .unwrap();
    r
}

#[test]
fn raster_marks_fired_samples() {
    let r = spiking_registry();
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let cfg = PanelConfig::of_kind("raster").with_ids(vec![vec![2, 5, 9, 7]]);
    let mut p = panel(&r, "lpu", cfg, &mut fig);
    assert_eq!(
        p.state(),
        &PanelState::Raster {
            rows: vec![Some(0), Some(1), Some(2), None]
        }
    );
    let axes = fig.axes_at(0).unwrap();
    assert_eq!(axes.decor.ylim, Some((0.5, 4.5)));
    assert_eq!(axes.decor.xlim, Some((0.0, 4.0)));
    assert_eq!(axes.decor.xlabel.as_ref().map(|l| l.size), Some(17.0));

    p.update(r.source("lpu").unwrap(), &mut fig, &ctx(3, 2))
        .unwrap();
    match &fig.axes_at(0).unwrap().artists[0] {
        Artist::VLines(v) => {
            assert_eq!(
                v.segments,
                vec![(0.0, 0.0, 0.01), (3.0, 1.75, 2.25), (2.0, 2.75, 3.25)]
            );
        }
        other => panic!("unexpected artist {other:?}"),
    }
}

#[test]
fn rate_appends_population_rate() {
    let r = spiking_registry();
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let cfg = PanelConfig::of_kind("rate").with_ids(vec![vec![2, 5, 9]]);
    let mut p = panel(&r, "lpu", cfg, &mut fig);
    p.update(r.source("lpu").unwrap(), &mut fig, &ctx(4, 2))
        .unwrap();
    match &fig.axes_at(0).unwrap().artists[0] {
        Artist::Line(l) => {
            assert_eq!(l.x, vec![4.0]);
            assert_eq!(l.y, vec![2.0 / 6.0]);
        }
        other => panic!("unexpected artist {other:?}"),
    }
}

fn dome_registry() -> SourceRegistry {
    let topo = Topology::new(vec![
        NodeAttrs::new(0, false).with_position(0.0, 0.0),
        NodeAttrs::new(1, false).with_position(1.5, 0.0),
        NodeAttrs::new(2, false),
    ])
    .unwrap();
    let data = Matrix::from_rows(vec![
        vec![-70.0, 0.0, 5.0],
        vec![0.0, -70.0, -35.0],
        vec![0.0, 0.0, 0.0],
    ])
    .unwrap();
    let mut r = SourceRegistry::new();
    r.register(SourceDesc::measured("retina", data, topo), &JsonLoader)
        .unwrap();
    r
}

#[test]
fn dome_surface_matches_grid_and_is_rebuilt() {
    let r = dome_registry();
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let cfg = PanelConfig::of_kind("dome").with_ids(vec![vec![0, 1]]);
    let mut p = panel(&r, "retina", cfg, &mut fig);
    let axes = fig.axes_at(0).unwrap();
    assert_eq!(axes.projection, AxesProjection::ThreeD);
    assert_eq!(axes.artists.len(), 1);
    match &axes.artists[0] {
        Artist::Surface(s) => {
            assert_eq!(s.facecolors.len(), s.grid.sample_count());
            assert_eq!(s.facecolors[0], [0.0, 0.0, 0.0, 1.0]);
        }
        other => panic!("unexpected artist {other:?}"),
    }
    match p.state() {
        PanelState::Dome { norm, .. } => assert_eq!((norm.vmin, norm.vmax), (-70.0, 0.0)),
        other => panic!("unexpected state {other:?}"),
    }

    p.update(r.source("retina").unwrap(), &mut fig, &ctx(1, 1))
        .unwrap();
    let axes = fig.axes_at(0).unwrap();
    assert_eq!(axes.artists.len(), 1);
    assert_eq!(axes.decor.title.as_ref().map(|t| t.text.as_str()), Some("retina"));
    match &axes.artists[0] {
        Artist::Surface(s) => assert_eq!(s.facecolors[0], [1.0, 1.0, 1.0, 1.0]),
        other => panic!("unexpected artist {other:?}"),
    }
}

#[test]
fn dome_auto_norm_uses_data_range() {
    let r = dome_registry();
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let cfg = PanelConfig::of_kind("dome")
        .with_ids(vec![vec![0, 1]])
        .with_norm(NormSpec::Keyword(NormKeyword::Auto));
    let p = panel(&r, "retina", cfg, &mut fig);
    match p.state() {
        PanelState::Dome { norm, .. } => assert_eq!((norm.vmin, norm.vmax), (-70.0, 5.0)),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn dome_needs_node_positions() {
    let r = dome_registry();
    let spec = build_panel(
        &r,
        "retina",
        PanelConfig::of_kind("dome").with_ids(vec![vec![0, 2]]),
        &[],
        0,
    )
    .unwrap();
    let mut fig = Figure::subplots(1, 1, (4.0, 4.0), 18.0);
    let err = Panel::first_draw(spec, 0, r.source("retina").unwrap(), &mut fig, &ctx(0, 1))
        .unwrap_err();
    assert!(matches!(err, LpuvisError::Data(_)));
}
