//! Animation systems - advance scene transforms each frame.
//!
//! All three systems mutate components in place through `query_mut`;
//! nothing is allocated per frame, so they are safe to run at display
//! rate for arbitrarily long sessions.

use hecs::World;
use std::f32::consts::TAU;

use crate::components::{Bob, Placement, Spin, WaveSurface};

/// Yaw every spinning prop at its decorative rate, wrapping to [0, 2pi).
pub fn spin_system(world: &mut World, delta_seconds: f32) {
    for (_, (placement, spin)) in world.query_mut::<(&mut Placement, &Spin)>() {
        placement.rotation_y = (placement.rotation_y + spin.rate * delta_seconds).rem_euclid(TAU);
    }
}

/// Float bobbing props around their base height. Driven by the absolute
/// clock rather than accumulated deltas so pausing and resuming cannot
/// drift the float center.
pub fn bob_system(world: &mut World, clock_seconds: f64) {
    let t = clock_seconds as f32;
    for (_, (placement, bob)) in world.query_mut::<(&mut Placement, &Bob)>() {
        placement.position.y = bob.base_y + (t * bob.rate + bob.phase).sin() * bob.amplitude;
    }
}

/// Rewrite every wave surface's vertex heights for the current clock:
/// `h = sin(x * 0.1 + t) * cos(z * 0.1 + t) * amplitude`.
pub fn wave_system(world: &mut World, clock_seconds: f64) {
    let t = clock_seconds as f32;
    for (_, wave) in world.query_mut::<&mut WaveSurface>() {
        let cols = (wave.segments_x + 1) as usize;
        let sx = wave.segments_x as f32;
        let sz = wave.segments_z as f32;
        let (width, depth, amplitude) = (wave.width, wave.depth, wave.amplitude);
        for (index, height) in wave.heights.iter_mut().enumerate() {
            let x = (index % cols) as f32 / sx * width - width / 2.0;
            let z = (index / cols) as f32 / sz * depth - depth / 2.0;
            *height = (x * 0.1 + t).sin() * (z * 0.1 + t).cos() * amplitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Color, Tint, Vec3};

    #[test]
    fn test_spin_advances_and_wraps() {
        let mut world = World::new();
        let entity = world.spawn((Placement::at(Vec3::ZERO), Spin { rate: 1.0 }));

        spin_system(&mut world, 0.5);
        let yaw = world.get::<&Placement>(entity).unwrap().rotation_y;
        assert!((yaw - 0.5).abs() < 0.001);

        // 100 radians of accumulated spin stays inside one turn.
        for _ in 0..199 {
            spin_system(&mut world, 0.5);
        }
        let yaw = world.get::<&Placement>(entity).unwrap().rotation_y;
        assert!((0.0..TAU).contains(&yaw));
    }

    #[test]
    fn test_bob_oscillates_around_base() {
        let mut world = World::new();
        let entity = world.spawn((
            Placement::at(Vec3::new(0.0, 5.0, 0.0)),
            Bob {
                amplitude: 1.0,
                rate: 1.0,
                base_y: 5.0,
                phase: 0.0,
            },
        ));

        bob_system(&mut world, 0.0);
        assert!((world.get::<&Placement>(entity).unwrap().position.y - 5.0).abs() < 0.001);

        bob_system(&mut world, std::f64::consts::FRAC_PI_2);
        assert!((world.get::<&Placement>(entity).unwrap().position.y - 6.0).abs() < 0.001);

        // Clock-driven: the same clock always lands on the same height.
        bob_system(&mut world, 0.0);
        assert!((world.get::<&Placement>(entity).unwrap().position.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_wave_heights_match_closed_form() {
        let mut world = World::new();
        let entity = world.spawn((
            WaveSurface::new(100.0, 100.0, 32, 32, 2.0),
            Placement::at(Vec3::ZERO),
            Tint::translucent(Color::WHITE, 0.7),
        ));

        let t = 3.7_f32;
        wave_system(&mut world, t as f64);

        let wave = world.get::<&WaveSurface>(entity).unwrap();
        for index in [0, 17, 300, wave.vertex_count() - 1] {
            let (x, z) = wave.vertex_xz(index);
            let expected = (x * 0.1 + t).sin() * (z * 0.1 + t).cos() * 2.0;
            assert!(
                (wave.heights[index] - expected).abs() < 0.001,
                "vertex {} height mismatch",
                index
            );
        }
    }

    #[test]
    fn test_systems_do_not_change_entity_count() {
        let mut world = World::new();
        let mut rng = rand::thread_rng();
        let scene = crate::generation::build_scene(&mut world, "ocean-depths", &mut rng);
        let before = world.len();

        for frame in 0..1000 {
            let clock = frame as f64 / 60.0;
            spin_system(&mut world, 1.0 / 60.0);
            bob_system(&mut world, clock);
            wave_system(&mut world, clock);
        }

        assert_eq!(world.len(), before);
        assert_eq!(scene.prop_count() as u32, before);
    }
}
