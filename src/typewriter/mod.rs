//! Typewriter reveal of the welcome script.

pub(crate) mod script;
pub(crate) mod sequencer;
