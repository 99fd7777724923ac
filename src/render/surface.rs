use crate::foundation::core::{Point, Rgba8, Viewport};

pub use kurbo::Rect;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is included to make this explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Convert to straight alpha, which is what PNG encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// The host 2D drawing capability.
///
/// Drawing is best-effort: implementations never fail a draw call, they drop what they cannot
/// render.
pub trait DrawSurface {
    /// Current backing size in pixels.
    fn size(&self) -> Viewport;
    /// Resize the backing store. Like a canvas, this may discard painted content.
    fn resize(&mut self, size: Viewport);
    /// Composite a solid rectangle over the current content.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Stroke a straight segment with butt caps.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8);
    /// Fill a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);
    /// Finish the current frame.
    fn present(&mut self) {}
    /// Read back the current content, if this surface keeps pixels.
    fn snapshot(&mut self) -> Option<FrameRGBA> {
        None
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Present,
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands recorded since the last [`DrawCommand::Present`].
    pub fn last_frame(&self) -> &[DrawCommand] {
        let end = match self.commands.last() {
            Some(DrawCommand::Present) => self.commands.len() - 1,
            _ => self.commands.len(),
        };
        let start = self.commands[..end]
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Present))
            .map_or(0, |i| i + 1);
        &self.commands[start..end]
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, size: Viewport) {
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
