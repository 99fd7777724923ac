use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::{DoofioError, DoofioResult};
use crate::foundation::math::{fill_over_in_place, over_in_place};
use crate::render::surface::{DrawSurface, FrameRGBA, Rect};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU surface with a persistent premultiplied RGBA8 buffer.
///
/// Nothing is cleared between frames. Rectangles are composited straight into the buffer;
/// lines and discs are batched into a `vello_cpu` context and composited over the buffer when the
/// batch is flushed (before the next rectangle, on `present`, or on `snapshot`).
pub struct CpuSurface {
    size: Viewport,
    buffer: Vec<u8>,
    ctx: vello_cpu::RenderContext,
    scratch: vello_cpu::Pixmap,
    pending: usize,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.size)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Create a surface. Fails when either dimension is zero or does not fit in `u16`.
    pub fn new(size: Viewport) -> DoofioResult<Self> {
        let (w, h) = surface_dims(size)?;
        Ok(Self {
            size,
            buffer: vec![0; buffer_len(size)],
            ctx: vello_cpu::RenderContext::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            pending: 0,
        })
    }

    /// Fill the whole buffer with `color`, replacing its content.
    pub fn clear(&mut self, color: Rgba8) {
        self.ctx.reset();
        self.pending = 0;
        let px = color.to_premul();
        for d in self.buffer.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    fn flush_shapes(&mut self) {
        if self.pending == 0 {
            return;
        }
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        if let Err(e) = over_in_place(&mut self.buffer, self.scratch.data_as_u8_slice()) {
            tracing::debug!(error = %e, "dropping starfield batch");
        }
        self.ctx.reset();
        self.pending = 0;
    }

    fn queue_fill(&mut self, path: &vello_cpu::kurbo::BezPath, color: Rgba8) {
        if color.a == 0 || self.buffer.is_empty() {
            return;
        }
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.ctx.fill_path(path);
        self.pending += 1;
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, size: Viewport) {
        if size == self.size {
            return;
        }
        match surface_dims(size) {
            Ok((w, h)) => {
                self.ctx = vello_cpu::RenderContext::new(w, h);
                self.scratch = vello_cpu::Pixmap::new(w, h);
                self.buffer = vec![0; buffer_len(size)];
            }
            Err(e) => {
                tracing::debug!(error = %e, "surface resized to an unpaintable size");
                self.buffer.clear();
            }
        }
        self.size = size;
        self.pending = 0;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.flush_shapes();
        if color.a == 0 || self.buffer.is_empty() {
            return;
        }

        let w = f64::from(self.size.width);
        let h = f64::from(self.size.height);
        let x0 = rect.x0.min(rect.x1).clamp(0.0, w).round() as usize;
        let x1 = rect.x0.max(rect.x1).clamp(0.0, w).round() as usize;
        let y0 = rect.y0.min(rect.y1).clamp(0.0, h).round() as usize;
        let y1 = rect.y0.max(rect.y1).clamp(0.0, h).round() as usize;

        let src = color.to_premul();
        let stride = self.size.width as usize * 4;
        for y in y0..y1 {
            fill_over_in_place(&mut self.buffer[y * stride + x0 * 4..y * stride + x1 * 4], src);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        if width.is_nan() || width <= 0.0 {
            return;
        }
        let d = to - from;
        let len = d.hypot();
        if !len.is_finite() || len <= f64::EPSILON {
            return;
        }
        // Butt caps: a quad offset by half the width along the segment normal.
        let n = kurbo::Vec2::new(-d.y, d.x) * (width / (2.0 * len));
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(cpu_point(from + n));
        path.line_to(cpu_point(to + n));
        path.line_to(cpu_point(to - n));
        path.line_to(cpu_point(from - n));
        path.close_path();
        self.queue_fill(&path, color);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius.is_nan() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let path = vello_cpu::kurbo::Circle::new(cpu_point(center), radius).to_path(CIRCLE_TOLERANCE);
        self.queue_fill(&path, color);
    }

    fn present(&mut self) {
        self.flush_shapes();
    }

    fn snapshot(&mut self) -> Option<FrameRGBA> {
        self.flush_shapes();
        if self.buffer.is_empty() {
            return None;
        }
        Some(FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.buffer.clone(),
            premultiplied: true,
        })
    }
}

fn surface_dims(size: Viewport) -> DoofioResult<(u16, u16)> {
    if size.is_empty() {
        return Err(DoofioError::render("surface dimensions must be non-zero"));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| DoofioError::render("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| DoofioError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn buffer_len(size: Viewport) -> usize {
    (size.width as usize)
        .saturating_mul(size.height as usize)
        .saturating_mul(4)
}

fn cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
