//! Drawing surfaces for the starfield.
//!
//! The page only talks to [`DrawSurface`](surface::DrawSurface); hosts provide an
//! implementation. Two are built in: [`CpuSurface`](cpu::CpuSurface) rasterizes with `vello_cpu`
//! into a persistent buffer, [`RecordingSurface`](surface::RecordingSurface) keeps the command
//! stream for inspection.

/// `vello_cpu` backed surface.
pub mod cpu;
/// Surface trait, frame type, and the recording surface.
pub mod surface;
