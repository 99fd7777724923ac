//! Tone bursts for the typewriter.
//!
//! [`ToneSpec`](tone::ToneSpec) describes a burst and [`ToneSink`](handle::ToneSink) is the
//! host's synthesis capability. The page only plays through its
//! [`AudioHandle`](handle::AudioHandle), which it owns from mount to unmount.

/// Scoped audio handle with mute gating.
pub mod handle;
/// Offline mixdown of scheduled tones.
pub mod mix;
/// Tone descriptions and synthesis.
pub mod tone;
