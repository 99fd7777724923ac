//! The welcome page: mounts the starfield, typewriter and audio, and derives the view.

pub(crate) mod view;
pub(crate) mod welcome;
