use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Matrix;
use crate::render::backend::FrameRGBA;
use crate::source::io::JsonLoader;

#[derive(Default)]
struct Recorder {
    dpis: Vec<f64>,
}

impl FigureRenderer for Recorder {
    fn render(&mut self, _fig: &Figure, dpi: f64) -> LpuvisResult<FrameRGBA> {
        self.dpis.push(dpi);
        Ok(FrameRGBA {
            width: 4,
            height: 2,
            data: vec![0; 32],
            premultiplied: true,
        })
    }
}

fn ramp(channels: usize, timesteps: usize) -> Matrix {
    let data = (0..channels * timesteps).map(|i| i as f64).collect();
    Matrix::from_vec(channels, timesteps, data).unwrap()
}

fn visualizer(update_interval: usize, timesteps: usize) -> Visualizer {
    let mut v = Visualizer::new(VisualizerConfig {
        update_interval,
        ..VisualizerConfig::default()
    });
    v.add_source(SourceDesc::input("a", ramp(4, timesteps)), &JsonLoader)
        .unwrap();
    v.add_panel("input_a", PanelConfig::of_kind("image"), &[], 0)
        .unwrap();
    v
}

#[test]
fn zero_interval_collapses_to_one_terminal_tick() {
    assert_eq!(effective_stride(0, 100), 99);
    let anim = AnimationState::new(0, 100);
    assert_eq!(anim.stride, 99);
    assert_eq!(anim.t, 100);
    assert_eq!(anim.tick_count(), 1);
}

#[test]
fn zero_interval_on_single_step_data_still_advances() {
    assert_eq!(effective_stride(0, 1), 1);
    assert_eq!(AnimationState::new(0, 1).tick_count(), 0);
}

#[test]
fn tick_count_covers_reference_points_below_maxt() {
    assert_eq!(AnimationState::new(1, 4).tick_count(), 3);
    assert_eq!(AnimationState::new(2, 4).tick_count(), 1);
    assert_eq!(AnimationState::new(3, 4).tick_count(), 1);
    assert_eq!(AnimationState::new(4, 4).tick_count(), 0);
    assert_eq!(AnimationState::new(50, 1000).tick_count(), 19);
}

#[test]
fn run_without_panels_is_a_configuration_error() {
    let mut v = Visualizer::new(VisualizerConfig::default());
    let err = v
        .run_with(&mut Recorder::default(), None, &RunOpts::default())
        .unwrap_err();
    assert!(matches!(err, LpuvisError::Configuration(_)));

    v.add_source(SourceDesc::input("a", ramp(1, 3)), &JsonLoader)
        .unwrap();
    let err = v
        .run_with(&mut Recorder::default(), None, &RunOpts::default())
        .unwrap_err();
    assert!(matches!(err, LpuvisError::Configuration(_)));
    assert_eq!(v.state(), DriverState::Uninitialized);
}

#[test]
fn sink_gets_first_frame_then_one_per_tick() {
    let mut v = visualizer(2, 9);
    let mut renderer = Recorder::default();
    let mut sink = InMemorySink::new();
    let stats = v
        .run_with(&mut renderer, Some(&mut sink), &RunOpts::default())
        .unwrap();

    assert_eq!(stats.ticks, 4);
    assert_eq!(stats.draws, 5);
    assert_eq!(stats.frames_rendered, 5);
    assert_eq!(stats.effective_stride, 2);
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps.num), (4, 2, 5));
    assert!(renderer.dpis.iter().all(|&d| d == 80.0));
    assert_eq!(v.state(), DriverState::Finished);
}

#[test]
fn final_frame_is_rendered_at_requested_dpi() {
    let mut v = visualizer(0, 5);
    let mut renderer = Recorder::default();
    let path = std::env::temp_dir()
        .join(format!("lpuvis-driver-{}", std::process::id()))
        .join("final.png");
    let opts = RunOpts {
        final_dpi: 120.0,
        ..RunOpts::final_frame(&path)
    };
    let stats = v.run_with(&mut renderer, None, &opts).unwrap();

    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.frames_rendered, 0);
    assert_eq!(renderer.dpis, vec![120.0]);
    assert!(path.exists());
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn panels_are_grouped_by_source_in_order_of_first_use() {
    let mut v = Visualizer::new(VisualizerConfig::default());
    v.add_source(SourceDesc::input("a", ramp(2, 3)), &JsonLoader)
        .unwrap();
    v.add_source(SourceDesc::input("b", ramp(2, 3)), &JsonLoader)
        .unwrap();
    for (src, title) in [("input_b", "b1"), ("input_a", "a1"), ("input_b", "b2")] {
        v.add_panel(src, PanelConfig::of_kind("image").with_title(title), &[], 0)
            .unwrap();
    }
    let titles: Vec<&str> = v.panel_specs().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["b1", "b2", "a1"]);

    v.run_with(&mut Recorder::default(), None, &RunOpts::default())
        .unwrap();
    let slots: Vec<(usize, &str)> = v
        .panels()
        .iter()
        .map(|p| (p.slot(), p.spec().title.as_str()))
        .collect();
    assert_eq!(slots, vec![(0, "b1"), (1, "b2"), (2, "a1")]);
}

#[test]
fn suptitle_uses_fontsize_plus_one() {
    let mut v = visualizer(1, 2);
    v.config_mut().title = Some("LPU".to_string());
    v.run_with(&mut Recorder::default(), None, &RunOpts::default())
        .unwrap();
    let title = v.figure().and_then(|f| f.suptitle.clone()).unwrap();
    assert_eq!(title.text, "LPU");
    assert_eq!(title.size, 19.0);
    assert!(title.bold);
}

#[test]
fn maxt_caps_the_run_across_sources() {
    let mut v = visualizer(1, 10);
    v.add_source(SourceDesc::input("short", ramp(1, 3)), &JsonLoader)
        .unwrap();
    let stats = v
        .run_with(&mut Recorder::default(), None, &RunOpts::default())
        .unwrap();
    assert_eq!(stats.ticks, 2);
}
