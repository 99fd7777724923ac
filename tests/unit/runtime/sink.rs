use super::*;

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::default(),
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 2, [0; 4])).unwrap();
    sink.push_frame(FrameIndex(1), &frame(4, 2, [9, 9, 9, 255])).unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().width, 4);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(sink.frames()[1].1.pixel(3, 1), Some([9, 9, 9, 255]));
}

#[test]
fn begin_resets_in_memory_sink() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 2, [0; 4])).unwrap();
    sink.end().unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}

#[test]
fn flatten_shows_background_through_transparency() {
    let bg = Rgba8::rgb(0x0f, 0x0f, 0x23);
    let clear = flatten(&frame(2, 2, [0, 0, 0, 0]), bg);
    assert_eq!(clear.pixel(1, 1), Some([0x0f, 0x0f, 0x23, 255]));

    let opaque = flatten(&frame(2, 2, [255, 255, 255, 255]), bg);
    assert_eq!(opaque.pixel(0, 0), Some([255, 255, 255, 255]));

    let half = flatten(&frame(1, 1, [0, 0, 0, 128]), Rgba8::WHITE);
    let p = half.pixel(0, 0).unwrap();
    assert_eq!(p[3], 255);
    assert!((126..=128).contains(&p[0]), "got {p:?}");
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = std::path::PathBuf::from("target").join("png_sink_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir).with_background(Rgba8::BLACK);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 2, [0, 0, 0, 0])).unwrap();
    sink.push_frame(FrameIndex(1), &frame(4, 2, [255, 0, 0, 255])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);

    let first = dir.join("frame_00000.png");
    assert_eq!(sink.frame_path(FrameIndex(0)), first);
    let img = image::open(dir.join("frame_00001.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    let img = image::open(first).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}
