use super::*;
use crate::render::surface::{DrawCommand, RecordingSurface};

fn small_config() -> StarfieldConfig {
    StarfieldConfig {
        count: 64,
        ..StarfieldConfig::default()
    }
}

fn depths_in_range(field: &Starfield) -> bool {
    let z_max = field.config().z_max;
    field.particles().iter().all(|p| p.z > 0.0 && p.z <= z_max)
}

#[test]
fn allocates_configured_count_with_valid_depth() {
    let field = Starfield::new(StarfieldConfig::default(), Viewport::new(800, 600), 7).unwrap();
    assert_eq!(field.particles().len(), 800);
    assert!(depths_in_range(&field));
    for p in field.particles() {
        assert!(p.x >= -400.0 && p.x < 400.0);
        assert!(p.y >= -300.0 && p.y < 300.0);
        assert!(p.size >= 0.0 && p.size < 2.0);
        assert!(field.config().palette.contains(&p.color));
    }
}

#[test]
fn same_seed_same_field() {
    let a = Starfield::new(small_config(), Viewport::new(320, 200), 42).unwrap();
    let b = Starfield::new(small_config(), Viewport::new(320, 200), 42).unwrap();
    let c = Starfield::new(small_config(), Viewport::new(320, 200), 43).unwrap();
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
}

#[test]
fn depth_stays_in_range_at_every_frame_start() {
    let config = StarfieldConfig {
        count: 32,
        step: 97.0,
        ..StarfieldConfig::default()
    };
    let mut field = Starfield::new(config, Viewport::new(320, 200), 1).unwrap();
    for _ in 0..200 {
        assert!(depths_in_range(&field));
        field.advance();
    }
    assert!(depths_in_range(&field));
    assert_eq!(field.frames(), 200);
}

#[test]
fn star_reaching_the_viewer_respawns_at_far_plane_before_drawing() {
    let config = StarfieldConfig {
        count: 1,
        ..StarfieldConfig::default()
    };
    let mut field = Starfield::new(config, Viewport::new(100, 100), 3).unwrap();
    field.particles[0].z = 2.0;

    let strokes = field.advance();
    let star = &field.particles()[0];
    assert_eq!(star.z, 1000.0);
    assert!(star.x >= -50.0 && star.x < 50.0);
    // Drawn at the far plane: fully transparent and zero width.
    assert_eq!(strokes[0].color.a, 0);
    assert_eq!(strokes[0].width, 0.0);
    assert_eq!(strokes[0].to, star.project(100.0, Point::new(50.0, 50.0)));
}

#[test]
fn stroke_runs_from_previous_to_current_projection() {
    let config = StarfieldConfig {
        count: 1,
        ..StarfieldConfig::default()
    };
    let mut field = Starfield::new(config, Viewport::new(200, 100), 9).unwrap();
    {
        let p = &mut field.particles[0];
        p.x = 40.0;
        p.y = -10.0;
        p.z = 500.0;
        p.size = 2.0;
    }

    let strokes = field.advance();
    let s = strokes[0];
    approx::assert_relative_eq!(s.from.x, 40.0 / 500.0 * 100.0 + 100.0);
    approx::assert_relative_eq!(s.from.y, -10.0 / 500.0 * 100.0 + 50.0);
    approx::assert_relative_eq!(s.to.x, 40.0 / 498.0 * 100.0 + 100.0);
    approx::assert_relative_eq!(s.to.y, -10.0 / 498.0 * 100.0 + 50.0);
    approx::assert_relative_eq!(s.width, (1.0 - 498.0 / 1000.0) * 2.0);
    assert_eq!(s.color.a, ((1.0 - 498.0 / 1000.0) * 255.0f64).floor() as u8);
    assert_eq!(field.particles()[0].previous_projected, s.from);
}

#[test]
fn render_paints_overlay_then_visible_stars() {
    let mut field = Starfield::new(small_config(), Viewport::new(320, 200), 5).unwrap();
    let mut surface = RecordingSurface::new(Viewport::new(320, 200));
    field.render(&mut surface);

    let frame = surface.last_frame();
    match frame[0] {
        DrawCommand::FillRect { rect, color } => {
            assert_eq!(rect, Rect::new(0.0, 0.0, 320.0, 200.0));
            assert_eq!(color, Rgba8::BLACK.with_alpha(25));
        }
        ref other => panic!("expected overlay first, got {other:?}"),
    }
    let rest = &frame[1..];
    assert_eq!(rest.len() % 2, 0);
    for pair in rest.chunks_exact(2) {
        assert!(matches!(pair[0], DrawCommand::StrokeLine { .. }));
        assert!(matches!(pair[1], DrawCommand::FillCircle { .. }));
    }
    assert!(rest.len() / 2 <= 64);
    assert_eq!(surface.commands().last(), Some(&DrawCommand::Present));
}

#[test]
fn resize_keeps_particles_and_moves_center() {
    let mut field = Starfield::new(small_config(), Viewport::new(320, 200), 11).unwrap();
    field.advance();
    let before = field.particles().to_vec();

    field.resize(Viewport::new(640, 480));
    assert_eq!(field.particles(), &before[..]);
    assert_eq!(field.viewport(), Viewport::new(640, 480));

    let strokes = field.advance();
    let p = &before[0];
    if p.z - 2.0 > 0.0 {
        approx::assert_relative_eq!(strokes[0].from.x, p.x / p.z * 100.0 + 320.0);
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = StarfieldConfig {
        palette: Vec::new(),
        ..StarfieldConfig::default()
    };
    assert!(Starfield::new(config, Viewport::new(10, 10), 0).is_err());
}
