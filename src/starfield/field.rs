use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::DoofioResult;
use crate::render::surface::{DrawSurface, Rect};
use crate::starfield::particle::{Particle, StarfieldConfig};

/// Geometry of one star for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarStroke {
    pub from: Point,
    pub to: Point,
    /// Trail width, also used as the radius of the head.
    pub width: f64,
    /// Palette color with closeness baked into alpha.
    pub color: Rgba8,
}

impl StarStroke {
    fn is_visible(&self) -> bool {
        self.color.a > 0 && self.width > 0.0
    }
}

/// The particle system behind the welcome screen.
#[derive(Debug)]
pub struct Starfield {
    config: StarfieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: StdRng,
    frames: u64,
}

impl Starfield {
    pub fn new(config: StarfieldConfig, viewport: Viewport, seed: u64) -> DoofioResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..config.count)
            .map(|_| {
                let (x, y) = spawn_xy(&mut rng, viewport);
                Particle {
                    x,
                    y,
                    // (0, z_max]: a star never starts on the viewer plane.
                    z: config.z_max * (1.0 - rng.r#gen::<f64>()),
                    previous_projected: Point::ZERO,
                    size: rng.r#gen::<f64>() * config.max_size,
                    color: config.palette[rng.gen_range(0..config.palette.len())],
                }
            })
            .collect();

        tracing::debug!(count = config.count, ?viewport, "starfield allocated");
        Ok(Self {
            config,
            viewport,
            particles,
            rng,
            frames: 0,
        })
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Follow a viewport change. Particles keep their state; only the projection center and the
    /// respawn area move.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Move every star one step toward the viewer and return what to draw.
    pub fn advance(&mut self) -> Vec<StarStroke> {
        let center = self.viewport.center();
        let StarfieldConfig {
            z_max,
            step,
            focal_scale,
            ..
        } = self.config;

        let mut strokes = Vec::with_capacity(self.particles.len());
        for star in &mut self.particles {
            star.previous_projected = star.project(focal_scale, center);

            star.z -= step;
            if star.z <= 0.0 {
                let (x, y) = spawn_xy(&mut self.rng, self.viewport);
                star.x = x;
                star.y = y;
                star.z = z_max;
            }

            let closeness = star.closeness(z_max);
            strokes.push(StarStroke {
                from: star.previous_projected,
                to: star.project(focal_scale, center),
                width: closeness * star.size,
                color: star.color.with_opacity(closeness),
            });
        }
        self.frames += 1;
        strokes
    }

    /// Advance one frame and paint it: translucent overlay first, then trail and head per star.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        let strokes = self.advance();

        let size = surface.size();
        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(size.width), f64::from(size.height)),
            Rgba8::BLACK.with_opacity(self.config.trail_alpha),
        );
        for s in strokes.iter().filter(|s| s.is_visible()) {
            surface.stroke_line(s.from, s.to, s.width, s.color);
            surface.fill_circle(s.to, s.width, s.color);
        }
        surface.present();
    }
}

fn spawn_xy(rng: &mut StdRng, viewport: Viewport) -> (f64, f64) {
    let w = f64::from(viewport.width);
    let h = f64::from(viewport.height);
    (
        rng.r#gen::<f64>() * w - w / 2.0,
        rng.r#gen::<f64>() * h - h / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/starfield/field.rs"]
mod tests;
