//! Perspective starfield: particles receding from the viewer, painted as fading trails.

pub(crate) mod field;
pub(crate) mod particle;
