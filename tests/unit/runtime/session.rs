use super::*;
use crate::audio::handle::RecordingToneSink;
use crate::foundation::core::Viewport;
use crate::render::surface::RecordingSurface;
use crate::runtime::sink::InMemorySink;
use crate::typewriter::sequencer::{Sequencer, TypewriterEvent};

fn small_config() -> WelcomeConfig {
    let mut cfg = WelcomeConfig {
        viewport: Viewport::new(32, 24),
        fps: Fps::new(10, 1).unwrap(),
        ..WelcomeConfig::default()
    };
    cfg.starfield.count = 16;
    cfg
}

fn cpu_page(cfg: WelcomeConfig) -> WelcomePage<RecordingToneSink> {
    let surface = CpuSurface::new(cfg.viewport).unwrap();
    WelcomePage::mount(
        cfg,
        Some(Box::new(surface)),
        AudioHandle::open(RecordingToneSink::new(), 1),
        0,
    )
    .unwrap()
}

#[test]
fn zero_frames_is_rejected() {
    let mut page = cpu_page(small_config());
    let mut sink = InMemorySink::new();
    assert!(run_session(&mut page, 0, Fps::default(), &mut sink).is_err());
}

#[test]
fn session_pushes_every_frame_and_collects_the_timeline() {
    let cfg = small_config();
    let expected = Sequencer::timeline(&cfg.script, &cfg.typewriter, cfg.load_delay_ms).unwrap();
    let mut page = cpu_page(cfg);
    let mut sink = InMemorySink::new();

    let stats = run_session(&mut page, 60, Fps::new(10, 1).unwrap(), &mut sink).unwrap();

    assert_eq!(stats.frames_total, 60);
    assert_eq!(stats.frames_pushed, 60);
    assert_eq!(stats.frames_skipped, 0);
    assert_eq!(stats.end_ms, 5_900);
    assert_eq!(stats.events, expected);
    assert_eq!(
        stats.events.last().map(|e| e.event),
        Some(TypewriterEvent::ButtonsRevealed)
    );
    assert!(sink.is_ended());
    assert_eq!(sink.frames().len(), 60);
    assert_eq!(sink.frames()[0].1.width, 32);
    assert_eq!(page.typewriter().revealed_text, "Hello,\nWelcome to\nDOOFIO.SITE");
    assert!(page.typewriter().buttons_visible);
    assert_eq!(page.audio().played(), 30);
}

#[test]
fn surfaces_without_pixels_skip_frames() {
    let cfg = small_config();
    let mut page = WelcomePage::mount(
        cfg,
        Some(Box::new(RecordingSurface::new(Viewport::new(1, 1)))),
        AudioHandle::open(RecordingToneSink::new(), 1),
        0,
    )
    .unwrap();
    let mut sink = InMemorySink::new();
    let stats = run_session(&mut page, 5, Fps::default(), &mut sink).unwrap();
    assert_eq!(stats.frames_pushed, 0);
    assert_eq!(stats.frames_skipped, 5);
    assert!(sink.frames().is_empty());
}

#[test]
fn muted_session_keeps_the_timeline_and_plays_nothing() {
    let mut loud = cpu_page(small_config());
    let mut cfg = small_config();
    cfg.audio.sound_enabled = false;
    let mut quiet = cpu_page(cfg);

    let fps = Fps::new(10, 1).unwrap();
    let a = run_session(&mut loud, 60, fps, &mut InMemorySink::new()).unwrap();
    let b = run_session(&mut quiet, 60, fps, &mut InMemorySink::new()).unwrap();

    assert_eq!(a.events, b.events);
    assert_eq!(quiet.audio().played(), 0);
    let sink = quiet.unmount().into_sink().unwrap();
    assert!(sink.tones.is_empty());
}

#[test]
fn session_continues_from_the_page_clock() {
    let mut page = cpu_page(small_config());
    assert!(page.tick(1_400).is_empty());
    let stats = run_session(&mut page, 3, Fps::new(10, 1).unwrap(), &mut InMemorySink::new())
        .unwrap();
    assert_eq!(stats.end_ms, 1_600);
    let at: Vec<u64> = stats.events.iter().map(|e| e.at_ms).collect();
    assert_eq!(at, vec![1_500, 1_600]);
}

#[test]
fn render_to_dir_writes_frames_and_soundtrack() {
    let dir = std::path::PathBuf::from("target").join("render_to_dir_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let opts = RenderOpts {
        frames: Some(60),
        ..RenderOpts::default()
    };
    let report = render_to_dir(&small_config(), &dir, &opts).unwrap();

    assert_eq!(report.stats.frames_pushed, 60);
    assert_eq!(report.tones, 30);
    assert!(dir.join("frame_00000.png").is_file());
    assert!(dir.join("frame_00059.png").is_file());
    assert_eq!(report.soundtrack, dir.join(SOUNDTRACK_FILE));

    let reader = hound::WavReader::open(&report.soundtrack).unwrap();
    assert_eq!(reader.spec().sample_rate, 48_000);
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.len(), 6_000 * 48 * 2);
}

#[test]
fn muted_render_mixes_no_tones() {
    let dir = std::path::PathBuf::from("target").join("render_to_dir_muted_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let opts = RenderOpts {
        frames: Some(20),
        mute: true,
        ..RenderOpts::default()
    };
    let report = render_to_dir(&small_config(), &dir, &opts).unwrap();
    assert_eq!(report.tones, 0);
    assert!(report.soundtrack.is_file());
}

#[test]
fn render_frame_is_opaque_and_deterministic() {
    let cfg = small_config();
    let bg = PngSequenceSink::DEFAULT_BACKGROUND;
    let a = render_frame(&cfg, FrameIndex(12), bg).unwrap();
    let b = render_frame(&cfg, FrameIndex(12), bg).unwrap();
    assert_eq!((a.width, a.height), (32, 24));
    assert!(a.data.chunks_exact(4).all(|p| p[3] == 255));
    assert_eq!(a.data, b.data);
}

#[test]
fn render_frame_needs_a_paintable_viewport() {
    let mut cfg = small_config();
    cfg.viewport = Viewport::new(0, 24);
    assert!(render_frame(&cfg, FrameIndex(0), Rgba8::BLACK).is_err());
}
