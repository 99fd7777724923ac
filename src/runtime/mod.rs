//! Offline driver: one scheduler loop on a simulated clock, frames out to a [`FrameSink`].
//!
//! [`FrameSink`]: sink::FrameSink

/// Scheduler loop and one-shot render helpers.
pub mod session;
/// Frame sinks.
pub mod sink;
