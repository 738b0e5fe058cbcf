use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![v, v, v, 255, v, v, v, 255],
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(100, 1).unwrap(),
    }
}

#[test]
fn frames_reach_the_viewer_channel_in_order() {
    let (tx, rx) = std::sync::mpsc::sync_channel(4);
    let mut sink = WindowSink::new(tx);
    sink.begin(cfg()).unwrap();
    for i in 0..3u8 {
        sink.push_frame(FrameIndex(u64::from(i)), &frame(i * 10)).unwrap();
    }
    sink.end().unwrap();

    let got: Vec<u8> = rx.try_iter().map(|f| f.data[0]).collect();
    assert_eq!(got, vec![0, 10, 20]);
    assert_eq!(sink.frames_shown(), 3);
}

#[test]
fn closed_window_drops_frames_without_failing_the_run() {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    drop(rx);
    let mut sink = WindowSink::new(tx);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(0)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(0)).unwrap();
    assert!(sink.is_closed());
    assert_eq!(sink.frames_shown(), 0);
}

#[test]
fn push_before_begin_is_an_error() {
    let (tx, _rx) = std::sync::mpsc::sync_channel(1);
    let mut sink = WindowSink::new(tx);
    assert!(sink.push_frame(FrameIndex(0), &frame(0)).is_err());
}

#[test]
fn color_image_keeps_frame_size_and_pixels() {
    let image = color_image(&frame(200));
    assert_eq!(image.size, [2, 1]);
    assert_eq!(image.pixels[1], egui::Color32::from_rgba_premultiplied(200, 200, 200, 255));
}
