use std::path::{Path, PathBuf};

use crate::audio::handle::{AudioHandle, ToneSink};
use crate::audio::mix::Mixdown;
use crate::config::WelcomeConfig;
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{DoofioError, DoofioResult};
use crate::page::welcome::WelcomePage;
use crate::render::cpu::CpuSurface;
use crate::render::surface::{DrawSurface, FrameRGBA};
use crate::runtime::sink::{FrameSink, PngSequenceSink, SinkConfig};
use crate::typewriter::sequencer::TimedEvent;

/// File name of the soundtrack written next to the frames by [`render_to_dir`].
pub const SOUNDTRACK_FILE: &str = "welcome.wav";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_total: u64,
    pub frames_pushed: u64,
    /// Frames with no pixels to push (no surface, or a surface that keeps none).
    pub frames_skipped: u64,
    /// Typewriter events in reveal order.
    pub events: Vec<TimedEvent>,
    /// Simulated clock after the last frame.
    pub end_ms: u64,
}

/// Drive `page` for `frames` frames at `fps`, starting at the page's current clock.
///
/// Each frame: compute its timestamp, fire due timers, run the animation-frame callback, push
/// the surface snapshot to `sink`. Frames are pushed in strictly increasing index order.
#[tracing::instrument(skip(page, sink), fields(start_ms = page.now_ms()))]
pub fn run_session<S: ToneSink>(
    page: &mut WelcomePage<S>,
    frames: u64,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> DoofioResult<SessionStats> {
    if frames == 0 {
        return Err(DoofioError::validation("session must run at least one frame"));
    }

    let start_ms = page.now_ms();
    let size = page.config().viewport;
    sink.begin(SinkConfig {
        width: size.width,
        height: size.height,
        fps,
    })?;

    let mut stats = SessionStats::default();
    for f in 0..frames {
        let idx = FrameIndex(f);
        let now = start_ms.saturating_add(fps.frame_to_ms(idx));
        stats.events.extend(page.tick(now));
        page.animation_frame();
        match page.snapshot() {
            Some(frame) => {
                sink.push_frame(idx, &frame)?;
                stats.frames_pushed += 1;
            }
            None => stats.frames_skipped += 1,
        }
        stats.frames_total += 1;
        stats.end_ms = now;
    }
    sink.end()?;

    tracing::debug!(
        frames = stats.frames_total,
        events = stats.events.len(),
        end_ms = stats.end_ms,
        "session finished"
    );
    Ok(stats)
}

/// Options for [`render_to_dir`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Number of frames to render. `None` uses the configured duration.
    pub frames: Option<u64>,
    /// Background the transparent starfield is flattened over.
    pub background: Rgba8,
    /// Force sound off regardless of the config.
    pub mute: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            frames: None,
            background: PngSequenceSink::DEFAULT_BACKGROUND,
            mute: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderReport {
    pub stats: SessionStats,
    pub frames_dir: PathBuf,
    pub soundtrack: PathBuf,
    /// Tone bursts mixed into the soundtrack.
    pub tones: usize,
}

/// Render the welcome screen to `out_dir`: a PNG sequence plus a WAV soundtrack.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.as_ref().display()))]
pub fn render_to_dir(
    config: &WelcomeConfig,
    out_dir: impl AsRef<Path>,
    opts: &RenderOpts,
) -> DoofioResult<RenderReport> {
    let out_dir = out_dir.as_ref();
    let mut config = config.clone();
    if opts.mute {
        config.audio.sound_enabled = false;
    }
    config.validate()?;

    let frames = opts
        .frames
        .unwrap_or_else(|| config.fps.ms_to_frames_ceil(config.duration_ms))
        .max(1);
    let fps = config.fps;
    let seed = config.seed;
    let mixdown = Mixdown::new(config.audio.sample_rate, config.audio.channels)?;
    let surface: Box<dyn DrawSurface> = Box::new(CpuSurface::new(config.viewport)?);

    let mut page = WelcomePage::mount(
        config,
        Some(surface),
        AudioHandle::open(mixdown, seed),
        0,
    )?;
    let mut sink = PngSequenceSink::new(out_dir).with_background(opts.background);
    let stats = run_session(&mut page, frames, fps, &mut sink)?;

    let len_ms = fps.frame_to_ms(FrameIndex(frames));
    let mixdown = page
        .unmount()
        .into_sink()
        .ok_or_else(|| DoofioError::audio("mixdown sink was lost during the session"))?;
    let soundtrack = out_dir.join(SOUNDTRACK_FILE);
    mixdown.write_wav(&soundtrack, len_ms)?;

    Ok(RenderReport {
        stats,
        frames_dir: out_dir.to_path_buf(),
        soundtrack,
        tones: mixdown.scheduled().len(),
    })
}

/// Render the starfield as it stands after `frame` frames (inclusive), flattened over
/// `background`. Audio is unavailable for single frames.
#[tracing::instrument(skip(config))]
pub fn render_frame(
    config: &WelcomeConfig,
    frame: FrameIndex,
    background: Rgba8,
) -> DoofioResult<FrameRGBA> {
    let fps = config.fps;
    let surface: Box<dyn DrawSurface> = Box::new(CpuSurface::new(config.viewport)?);
    let mut page = WelcomePage::<Mixdown>::mount(
        config.clone(),
        Some(surface),
        AudioHandle::unavailable(),
        0,
    )?;

    for f in 0..=frame.0 {
        page.tick(fps.frame_to_ms(FrameIndex(f)));
        page.animation_frame();
    }
    let pixels = page
        .snapshot()
        .ok_or_else(|| DoofioError::render("surface did not keep any pixels"))?;
    page.unmount();
    Ok(crate::runtime::sink::flatten(&pixels, background))
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/session.rs"]
mod tests;
