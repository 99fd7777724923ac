use crate::audio::handle::{AudioHandle, ToneSink};
use crate::audio::tone::ToneCue;
use crate::foundation::error::{DoofioError, DoofioResult};
use crate::typewriter::script::{LINE_SEPARATOR, Script};

/// Reveal pacing, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypewriterTiming {
    /// From `start` to the first character.
    pub initial_delay_ms: u64,
    /// Between two characters, and from the last character to the line completing.
    pub char_interval_ms: u64,
    /// From a line completing to the first character of the next one.
    pub line_pause_ms: u64,
    /// From the last line completing to the buttons showing.
    pub final_pause_ms: u64,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            char_interval_ms: 100,
            line_pause_ms: 500,
            final_pause_ms: 500,
        }
    }
}

impl TypewriterTiming {
    pub fn validate(&self) -> DoofioResult<()> {
        if self.char_interval_ms == 0 {
            return Err(DoofioError::validation(
                "typewriter char_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}

/// What the page renders from the typewriter.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TypewriterState {
    /// Always a prefix of the script's full text.
    pub revealed_text: String,
    /// Index of the most recently completed line. Never decreases.
    pub current_line_index: usize,
    /// Set once, after the last line completes.
    pub buttons_visible: bool,
}

/// The step the sequencer executes next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Typing { line: usize, char: usize },
    LineComplete { line: usize },
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TypewriterEvent {
    CharRevealed { line: usize, ch: char },
    LineCompleted { line: usize },
    ButtonsRevealed,
}

impl TypewriterEvent {
    pub fn tone_cue(&self) -> Option<ToneCue> {
        match self {
            Self::CharRevealed { .. } => Some(ToneCue::Click),
            Self::LineCompleted { .. } => Some(ToneCue::Chime),
            Self::ButtonsRevealed => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: TypewriterEvent,
}

/// Result of executing one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: TypewriterState,
    pub event: Option<TypewriterEvent>,
    /// Delay from this step to the next one, and the phase to run then.
    pub next: Option<(u64, Phase)>,
}

/// Execute `phase` against `state`. Pure: the same inputs always produce the same transition.
pub fn transition(
    script: &Script,
    timing: &TypewriterTiming,
    state: &TypewriterState,
    phase: Phase,
) -> Transition {
    let mut state = state.clone();
    match phase {
        Phase::Idle => Transition {
            state,
            event: None,
            next: Some((timing.initial_delay_ms, Phase::Typing { line: 0, char: 0 })),
        },
        Phase::Typing { line, char } => {
            // The break before a line shows up with its first character, so the caret stays
            // on the finished line during the pause.
            if line > 0 && char == 0 {
                state.revealed_text.push(LINE_SEPARATOR);
            }
            typing_step(script, timing, state, line, char)
        }
        Phase::LineComplete { line } => {
            state.current_line_index = state.current_line_index.max(line);
            let next = if line + 1 < script.len() {
                (timing.line_pause_ms, Phase::Typing {
                    line: line + 1,
                    char: 0,
                })
            } else {
                (timing.final_pause_ms, Phase::Done)
            };
            Transition {
                state,
                event: Some(TypewriterEvent::LineCompleted { line }),
                next: Some(next),
            }
        }
        Phase::Done => {
            let event = (!state.buttons_visible).then_some(TypewriterEvent::ButtonsRevealed);
            state.buttons_visible = true;
            Transition {
                state,
                event,
                next: None,
            }
        }
    }
}

fn typing_step(
    script: &Script,
    timing: &TypewriterTiming,
    mut state: TypewriterState,
    line: usize,
    char: usize,
) -> Transition {
    match script.char_at(line, char) {
        Some(ch) => {
            state.revealed_text.push(ch);
            let next = if char + 1 < script.line_chars(line) {
                Phase::Typing {
                    line,
                    char: char + 1,
                }
            } else {
                Phase::LineComplete { line }
            };
            Transition {
                state,
                event: Some(TypewriterEvent::CharRevealed { line, ch }),
                next: Some((timing.char_interval_ms, next)),
            }
        }
        // Empty line: nothing to type.
        None => Transition {
            state,
            event: None,
            next: Some((0, Phase::LineComplete { line })),
        },
    }
}

/// Drives [`transition`] on the page clock.
///
/// Each step is due a fixed delay after the previous step's due time, so the reveal schedule
/// does not depend on how often [`Sequencer::advance`] is called.
#[derive(Clone, Debug)]
pub struct Sequencer {
    script: Script,
    timing: TypewriterTiming,
    state: TypewriterState,
    phase: Phase,
    pending: Option<(u64, Phase)>,
    started: bool,
}

impl Sequencer {
    pub fn new(script: Script, timing: TypewriterTiming) -> DoofioResult<Self> {
        script.validate()?;
        timing.validate()?;
        Ok(Self {
            script,
            timing,
            state: TypewriterState::default(),
            phase: Phase::Idle,
            pending: None,
            started: false,
        })
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn timing(&self) -> &TypewriterTiming {
        &self.timing
    }

    pub fn state(&self) -> &TypewriterState {
        &self.state
    }

    /// The most recently executed phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_done(&self) -> bool {
        self.started && self.pending.is_none()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.map(|(due, _)| due)
    }

    /// Arm the sequence at `now_ms`. Only the first call has an effect.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        let t = transition(&self.script, &self.timing, &self.state, Phase::Idle);
        self.state = t.state;
        self.pending = t.next.map(|(delay, p)| (now_ms.saturating_add(delay), p));
        tracing::debug!(now_ms, "typewriter armed");
        true
    }

    /// Run every step due at or before `now_ms`, cueing tones through `audio`.
    pub fn advance<S: ToneSink>(
        &mut self,
        now_ms: u64,
        audio: &mut AudioHandle<S>,
    ) -> Vec<TimedEvent> {
        let mut events = Vec::new();
        while let Some((due, phase)) = self.pending {
            if due > now_ms {
                break;
            }
            let t = transition(&self.script, &self.timing, &self.state, phase);
            self.state = t.state;
            self.phase = phase;
            self.pending = t.next.map(|(delay, p)| (due.saturating_add(delay), p));

            if let Some(event) = t.event {
                if let Some(cue) = event.tone_cue() {
                    audio.cue(due, cue);
                }
                if event == TypewriterEvent::ButtonsRevealed {
                    tracing::debug!(at_ms = due, "typewriter finished");
                }
                events.push(TimedEvent { at_ms: due, event });
            }
        }
        events
    }

    /// The full event schedule for a sequence started at `start_ms`, without sound.
    pub fn timeline(
        script: &Script,
        timing: &TypewriterTiming,
        start_ms: u64,
    ) -> DoofioResult<Vec<TimedEvent>> {
        let mut seq = Self::new(script.clone(), *timing)?;
        let mut silent = AudioHandle::<crate::audio::handle::RecordingToneSink>::unavailable();
        seq.start(start_ms);
        let mut events = Vec::new();
        while let Some(due) = seq.next_due_ms() {
            events.extend(seq.advance(due, &mut silent));
        }
        Ok(events)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typewriter/sequencer.rs"]
mod tests;
