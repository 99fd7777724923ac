//! DOOFIO welcome screen engine.
//!
//! The landing page is modeled headless and deterministic on a simulated millisecond clock:
//!
//! - a [`Starfield`] of particles receding from the viewer, painted as trails onto a persistent
//!   [`DrawSurface`]
//! - a typewriter [`Sequencer`] driven by the pure [`transition`] step function, emitting tone
//!   cues through a scoped [`AudioHandle`]
//! - a [`WelcomePage`] composing both and producing a declarative [`WelcomeView`]
//! - [`run_session`], the single scheduler loop pushing frames into a [`FrameSink`]
//!
//! [`CpuSurface`] rasterizes with `vello_cpu`; [`Mixdown`] turns tone cues into a WAV soundtrack.
#![forbid(unsafe_code)]

mod foundation;

/// Tone synthesis, the scoped audio handle, and offline mixdown.
pub mod audio;
pub(crate) mod config;
pub(crate) mod page;
/// Drawing surfaces.
pub mod render;
/// Scheduler loop and frame sinks.
pub mod runtime;
pub(crate) mod starfield;
pub(crate) mod typewriter;

pub use crate::foundation::core::{Fps, FrameIndex, Point, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{DoofioError, DoofioResult};
pub use crate::foundation::math::{PremulRgba8, fill_over_in_place, over, over_in_place};

pub use crate::audio::handle::{AudioHandle, AudioState, RecordingToneSink, ToneSink};
pub use crate::audio::mix::{Mixdown, write_wav_f32};
pub use crate::audio::tone::{DECAY_FLOOR_GAIN, ToneCue, ToneSpec, Waveform};
pub use crate::config::{AudioConfig, WelcomeConfig};
pub use crate::page::view::{
    ACTIONS, ActionButton, BRAND, ButtonVariant, DUST_RADIUS, LineStyle, METADATA, NavAction,
    PageMetadata, STATUS_LINE, SoundToggle, TAGLINE, ViewLine, WelcomeView, render_lines,
    render_view,
};
pub use crate::page::welcome::WelcomePage;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::surface::{DrawCommand, DrawSurface, FrameRGBA, RecordingSurface, Rect};
pub use crate::runtime::session::{
    RenderOpts, RenderReport, SOUNDTRACK_FILE, SessionStats, render_frame, render_to_dir,
    run_session,
};
pub use crate::runtime::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, flatten, write_png,
};
pub use crate::starfield::field::{StarStroke, Starfield};
pub use crate::starfield::particle::{DEFAULT_PALETTE, Particle, StarfieldConfig};
pub use crate::typewriter::script::{LINE_SEPARATOR, Script};
pub use crate::typewriter::sequencer::{
    Phase, Sequencer, TimedEvent, Transition, TypewriterEvent, TypewriterState, TypewriterTiming,
    transition,
};
