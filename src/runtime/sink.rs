use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{DoofioError, DoofioResult};
use crate::foundation::math::over;
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DoofioResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DoofioResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> DoofioResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DoofioResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DoofioResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DoofioResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... flattened over a background color.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    background: Rgba8,
    written: u64,
}

impl PngSequenceSink {
    /// Deep blue of the page behind the canvas.
    pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::rgb(0x0f, 0x0f, 0x23);

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            background: Self::DEFAULT_BACKGROUND,
            written: 0,
        }
    }

    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> DoofioResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            DoofioError::render(format!(
                "failed to create frame directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DoofioResult<()> {
        let path = self.frame_path(idx);
        write_png(&path, &flatten(frame, self.background))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> DoofioResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Composite a frame over an opaque background.
pub fn flatten(frame: &FrameRGBA, background: Rgba8) -> FrameRGBA {
    let bg = background.with_alpha(255).to_premul();
    let mut data = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        data.extend_from_slice(&over(bg, [px[0], px[1], px[2], px[3]]));
    }
    FrameRGBA {
        width: frame.width,
        height: frame.height,
        data,
        premultiplied: true,
    }
}

pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> DoofioResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DoofioError::render(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DoofioError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/sink.rs"]
mod tests;
