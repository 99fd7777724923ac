use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{DoofioError, DoofioResult};

/// Default star colors: white, purple, blue, green, pink.
pub const DEFAULT_PALETTE: [Rgba8; 5] = [
    Rgba8::rgb(0xff, 0xff, 0xff),
    Rgba8::rgb(0xb7, 0x94, 0xf6),
    Rgba8::rgb(0x63, 0xb3, 0xed),
    Rgba8::rgb(0x68, 0xd3, 0x91),
    Rgba8::rgb(0xf0, 0x93, 0xfb),
];

/// One star. `x`/`y` are relative to the viewport center, `z` is the depth in `(0, z_max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Screen position computed before the last depth step.
    pub previous_projected: Point,
    /// Base size; the drawn size scales with closeness.
    pub size: f64,
    pub color: Rgba8,
}

impl Particle {
    /// Perspective projection: `(pos / z) * scale + center`.
    pub fn project(&self, scale: f64, center: Point) -> Point {
        Point::new(
            (self.x / self.z) * scale + center.x,
            (self.y / self.z) * scale + center.y,
        )
    }

    /// `1 - z / z_max`: 0 at the far plane, approaching 1 at the viewer.
    pub fn closeness(&self, z_max: f64) -> f64 {
        (1.0 - self.z / z_max).clamp(0.0, 1.0)
    }
}

/// Starfield tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub z_max: f64,
    /// Depth travelled per animation frame.
    pub step: f64,
    /// Projection scale applied after the perspective divide.
    pub focal_scale: f64,
    /// Opacity of the black overlay painted before each frame.
    pub trail_alpha: f64,
    pub max_size: f64,
    pub palette: Vec<Rgba8>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 800,
            z_max: 1000.0,
            step: 2.0,
            focal_scale: 100.0,
            trail_alpha: 0.1,
            max_size: 2.0,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl StarfieldConfig {
    pub fn validate(&self) -> DoofioResult<()> {
        if !(self.z_max.is_finite() && self.z_max > 0.0) {
            return Err(DoofioError::validation("starfield z_max must be > 0"));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(DoofioError::validation("starfield step must be > 0"));
        }
        if !self.focal_scale.is_finite() {
            return Err(DoofioError::validation("starfield focal_scale must be finite"));
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(DoofioError::validation(
                "starfield trail_alpha must be within [0, 1]",
            ));
        }
        if !(self.max_size.is_finite() && self.max_size >= 0.0) {
            return Err(DoofioError::validation("starfield max_size must be >= 0"));
        }
        if self.palette.is_empty() {
            return Err(DoofioError::validation("starfield palette must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/starfield/particle.rs"]
mod tests;
