use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::tone::{ToneCue, ToneSpec};
use crate::foundation::error::DoofioResult;

/// The host tone-synthesis capability.
pub trait ToneSink {
    /// Start `tone` at `at_ms` on the page clock.
    fn play(&mut self, at_ms: u64, tone: &ToneSpec) -> DoofioResult<()>;
}

impl<T: ToneSink + ?Sized> ToneSink for Box<T> {
    fn play(&mut self, at_ms: u64, tone: &ToneSpec) -> DoofioResult<()> {
        (**self).play(at_ms, tone)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioState {
    Running,
    /// Created but not allowed to sound yet; resumed by a user gesture.
    Suspended,
    Closed,
}

/// Audio resource acquired when the page mounts and closed when it unmounts.
///
/// All playback goes through [`AudioHandle::cue`] / [`AudioHandle::play`], which never fail: a
/// muted, suspended, closed or unavailable handle plays nothing, and sink errors are logged and
/// dropped.
#[derive(Debug)]
pub struct AudioHandle<S> {
    sink: Option<S>,
    state: AudioState,
    muted: bool,
    rng: StdRng,
    played: u64,
    dropped: u64,
}

impl<S: ToneSink> AudioHandle<S> {
    pub fn open(sink: S, seed: u64) -> Self {
        Self {
            sink: Some(sink),
            state: AudioState::Running,
            muted: false,
            rng: StdRng::seed_from_u64(seed),
            played: 0,
            dropped: 0,
        }
    }

    /// A handle for hosts without audio. Every play is a no-op.
    pub fn unavailable() -> Self {
        Self {
            sink: None,
            state: AudioState::Closed,
            muted: false,
            rng: StdRng::seed_from_u64(0),
            played: 0,
            dropped: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag, resuming a suspended handle. Returns the new mute state.
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.resume();
        self.muted
    }

    pub fn suspend(&mut self) {
        if self.state == AudioState::Running {
            self.state = AudioState::Suspended;
        }
    }

    pub fn resume(&mut self) {
        if self.state == AudioState::Suspended {
            self.state = AudioState::Running;
        }
    }

    pub fn close(&mut self) {
        if self.sink.is_some() {
            tracing::debug!(played = self.played, dropped = self.dropped, "audio closed");
        }
        self.state = AudioState::Closed;
    }

    /// Tones handed to the sink so far.
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Tones the sink rejected.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn into_sink(self) -> Option<S> {
        self.sink
    }

    fn can_sound(&self) -> bool {
        !self.muted && self.state == AudioState::Running && self.sink.is_some()
    }

    /// Build and play the tone for `cue`. Pitch randomization only happens for audible cues.
    pub fn cue(&mut self, at_ms: u64, cue: ToneCue) {
        if !self.can_sound() {
            return;
        }
        let tone = ToneSpec::for_cue(cue, &mut self.rng);
        self.play(at_ms, &tone);
    }

    pub fn play(&mut self, at_ms: u64, tone: &ToneSpec) {
        if !self.can_sound() {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match sink.play(at_ms, tone) {
            Ok(()) => self.played += 1,
            Err(e) => {
                self.dropped += 1;
                tracing::debug!(error = %e, at_ms, cue = ?tone.cue, "tone dropped");
            }
        }
    }
}

/// Sink that records every tone, optionally failing each call.
#[derive(Debug, Default)]
pub struct RecordingToneSink {
    pub tones: Vec<(u64, ToneSpec)>,
    pub fail: bool,
}

impl RecordingToneSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            tones: Vec::new(),
            fail: true,
        }
    }

    pub fn cues(&self) -> Vec<(u64, ToneCue)> {
        self.tones.iter().map(|(t, s)| (*t, s.cue)).collect()
    }
}

impl ToneSink for RecordingToneSink {
    fn play(&mut self, at_ms: u64, tone: &ToneSpec) -> DoofioResult<()> {
        if self.fail {
            return Err(crate::foundation::error::DoofioError::audio(
                "oscillator could not be created",
            ));
        }
        self.tones.push((at_ms, *tone));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/handle.rs"]
mod tests;
