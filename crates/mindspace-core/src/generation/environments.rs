//! Environment builders - one per scripted scene, plus the default.
//!
//! Prop counts, scatter bounds, and palette values are product constants;
//! only placements are randomized. Builders return every entity they
//! spawn so the scene can be torn down without a world scan.

use hecs::{Entity, World};
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

use crate::components::{
    Bob, Color, ParticleField, Placement, Prop, PropKind, Shape, Spin, Tint, Vec3, WaveSurface,
};

/// Uniform scatter in [-half, half] on one axis.
fn scatter(rng: &mut dyn RngCore, half: f32) -> f32 {
    rng.gen_range(-half..half)
}

/// A slow float with randomized cadence and phase so grouped props drift
/// out of step with each other.
fn drift(rng: &mut dyn RngCore, amplitude: f32, base_y: f32) -> Bob {
    Bob {
        amplitude,
        rate: rng.gen_range(0.4..1.2),
        base_y,
        phase: rng.gen_range(0.0..TAU),
    }
}

fn spawn_tree(world: &mut World, rng: &mut dyn RngCore, entities: &mut Vec<Entity>) {
    let x = scatter(rng, 25.0);
    let z = scatter(rng, 25.0);

    let trunk = world.spawn((
        Prop::new(
            PropKind::TreeTrunk,
            Shape::Cylinder {
                radius_top: 0.5,
                radius_bottom: 0.8,
                height: 8.0,
            },
        ),
        Placement::at(Vec3::new(x, 4.0, z)),
        Tint::solid(Color::from_hex("#92400e")),
    ));
    entities.push(trunk);

    let canopy = world.spawn((
        Prop::new(PropKind::TreeCanopy, Shape::Sphere { radius: 4.0 }),
        Placement::at(Vec3::new(x, 8.0, z)),
        Tint::solid(Color::from_hex("#16a34a")),
    ));
    entities.push(canopy);
}

/// Woodland clearing: 20 trees, a 50-sphere sound visualization, and a
/// 1000-point particle drift.
pub fn build_forest_sanctuary(world: &mut World, rng: &mut dyn RngCore) -> Vec<Entity> {
    let mut entities = Vec::new();

    for _ in 0..20 {
        spawn_tree(world, rng, &mut entities);
    }

    // Ambient sound rendered as small spinning spheres
    let sound_color = Color::from_hex("#10b981");
    for _ in 0..50 {
        let entity = world.spawn((
            Prop::new(PropKind::SoundOrb, Shape::Sphere { radius: 0.1 }),
            Placement::at(Vec3::new(
                scatter(rng, 10.0),
                rng.gen_range(0.0..10.0),
                scatter(rng, 10.0),
            )),
            Tint::solid(sound_color),
            Spin::decorative(),
        ));
        entities.push(entity);
    }

    entities.push(spawn_particle_field(
        world,
        rng,
        1000,
        Color::from_hex("#22c55e"),
    ));

    entities
}

/// Cavern of 15 emissive crystals and 8 floating energy orbs.
pub fn build_crystal_cave(world: &mut World, rng: &mut dyn RngCore) -> Vec<Entity> {
    let mut entities = Vec::new();

    let crystal_tint =
        Tint::translucent(Color::from_hex("#a855f7"), 0.8).with_emissive(0.3);
    for _ in 0..15 {
        let entity = world.spawn((
            Prop::new(
                PropKind::Crystal,
                Shape::Cone {
                    radius: 1.0,
                    height: 3.0,
                },
            ),
            Placement::at(Vec3::new(
                scatter(rng, 15.0),
                rng.gen_range(0.0..10.0),
                scatter(rng, 15.0),
            ))
            .with_rotation(rng.gen_range(0.0..TAU)),
            crystal_tint,
        ));
        entities.push(entity);
    }

    let orb_tint = Tint::translucent(Color::from_hex("#fbbf24"), 0.7);
    for _ in 0..8 {
        let y = rng.gen_range(5.0..20.0);
        let entity = world.spawn((
            Prop::new(PropKind::GlowOrb, Shape::Sphere { radius: 0.5 }),
            Placement::at(Vec3::new(scatter(rng, 10.0), y, scatter(rng, 10.0))),
            orb_tint,
            Spin::decorative(),
            drift(rng, 0.5, y),
        ));
        entities.push(entity);
    }

    entities
}

/// Open water: an animated wave surface and 50 drifting bubbles.
pub fn build_ocean_depths(world: &mut World, rng: &mut dyn RngCore) -> Vec<Entity> {
    let mut entities = Vec::new();

    let water = world.spawn((
        WaveSurface::new(100.0, 100.0, 32, 32, 2.0),
        Placement::at(Vec3::ZERO),
        Tint::translucent(Color::from_hex("#0ea5e9"), 0.7),
    ));
    entities.push(water);

    let bubble_tint = Tint::translucent(Color::WHITE, 0.3);
    for _ in 0..50 {
        let y = rng.gen_range(0.0..20.0);
        let entity = world.spawn((
            Prop::new(
                PropKind::Bubble,
                Shape::Sphere {
                    radius: rng.gen_range(0.2..0.5),
                },
            ),
            Placement::at(Vec3::new(scatter(rng, 20.0), y, scatter(rng, 20.0))),
            bubble_tint,
            Spin::decorative(),
            drift(rng, 0.8, y),
        ));
        entities.push(entity);
    }

    entities
}

/// Deep space: a translucent nebula shell, a 10,000-star field, and 20
/// pieces of slowly turning cosmic debris.
pub fn build_space_nebula(world: &mut World, rng: &mut dyn RngCore) -> Vec<Entity> {
    let mut entities = Vec::new();

    let nebula = world.spawn((
        Prop::new(PropKind::NebulaShell, Shape::Sphere { radius: 50.0 }),
        Placement::at(Vec3::ZERO),
        Tint::translucent(Color::from_hex("#6366f1"), 0.3),
        Spin::decorative(),
    ));
    entities.push(nebula);

    let mut stars = Vec::with_capacity(10_000);
    for _ in 0..10_000 {
        stars.push(Vec3::new(
            scatter(rng, 1000.0),
            scatter(rng, 1000.0),
            scatter(rng, 1000.0),
        ));
    }
    let star_field = world.spawn((
        ParticleField {
            points: stars,
            point_size: 2.0,
        },
        Placement::at(Vec3::ZERO),
        Tint::solid(Color::WHITE),
    ));
    entities.push(star_field);

    for _ in 0..20 {
        let entity = world.spawn((
            Prop::new(
                PropKind::CosmicDebris,
                Shape::Icosahedron {
                    radius: rng.gen_range(1.0..3.0),
                },
            ),
            Placement::at(Vec3::new(
                scatter(rng, 50.0),
                scatter(rng, 50.0),
                scatter(rng, 50.0),
            )),
            Tint::translucent(Color::from_hsl(rng.gen_range(0.0..360.0), 0.7, 0.5), 0.8),
            Spin::decorative(),
        ));
        entities.push(entity);
    }

    entities
}

/// The minimal scene used when no builder is registered: a bare ground
/// plane. Needs no randomness.
pub fn build_default_ground(world: &mut World) -> Vec<Entity> {
    let ground = world.spawn((
        Prop::new(
            PropKind::Ground,
            Shape::Plane {
                width: 50.0,
                depth: 50.0,
            },
        ),
        Placement::at(Vec3::ZERO),
        Tint::solid(Color::from_hex("#f3f4f6")),
    ));
    vec![ground]
}

fn spawn_particle_field(
    world: &mut World,
    rng: &mut dyn RngCore,
    count: usize,
    color: Color,
) -> Entity {
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Vec3::new(
            scatter(rng, 50.0),
            rng.gen_range(0.0..50.0),
            scatter(rng, 50.0),
        ));
    }
    world.spawn((
        ParticleField {
            points,
            point_size: 0.5,
        },
        Placement::at(Vec3::ZERO),
        Tint::translucent(color, 0.6),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count_kind(world: &World, kind: PropKind) -> usize {
        world
            .query::<&Prop>()
            .iter()
            .filter(|(_, prop)| prop.kind == kind)
            .count()
    }

    #[test]
    fn test_forest_census() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let entities = build_forest_sanctuary(&mut world, &mut rng);

        assert_eq!(count_kind(&world, PropKind::TreeTrunk), 20);
        assert_eq!(count_kind(&world, PropKind::TreeCanopy), 20);
        assert_eq!(count_kind(&world, PropKind::SoundOrb), 50);
        assert_eq!(world.query::<&ParticleField>().iter().count(), 1);
        // 20 trees x 2 parts + 50 orbs + 1 particle field
        assert_eq!(entities.len(), 91);
    }

    #[test]
    fn test_forest_trees_within_scatter_bounds() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        build_forest_sanctuary(&mut world, &mut rng);

        for (_, (prop, placement)) in world.query::<(&Prop, &Placement)>().iter() {
            if prop.kind == PropKind::TreeTrunk {
                assert!(placement.position.x.abs() <= 25.0);
                assert!(placement.position.z.abs() <= 25.0);
                assert_eq!(placement.position.y, 4.0);
            }
        }
    }

    #[test]
    fn test_crystal_cave_census_and_glow() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        build_crystal_cave(&mut world, &mut rng);

        assert_eq!(count_kind(&world, PropKind::Crystal), 15);
        assert_eq!(count_kind(&world, PropKind::GlowOrb), 8);

        for (_, (prop, tint)) in world.query::<(&Prop, &Tint)>().iter() {
            if prop.kind == PropKind::Crystal {
                assert!(tint.emissive > 0.0, "crystals must glow");
            }
        }

        // Orbs float and spin; crystals hold still.
        for (_, (prop, _)) in world.query::<(&Prop, &Spin)>().iter() {
            assert_ne!(prop.kind, PropKind::Crystal);
        }
    }

    #[test]
    fn test_ocean_has_wave_surface_and_bubbles() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(4);
        build_ocean_depths(&mut world, &mut rng);

        let waves: Vec<_> = world
            .query::<&WaveSurface>()
            .iter()
            .map(|(_, w)| (w.width, w.depth, w.segments_x, w.segments_z, w.amplitude))
            .collect();
        assert_eq!(waves, vec![(100.0, 100.0, 32, 32, 2.0)]);

        assert_eq!(count_kind(&world, PropKind::Bubble), 50);
        for (_, (prop, placement)) in world.query::<(&Prop, &Placement)>().iter() {
            if prop.kind == PropKind::Bubble {
                assert!(placement.position.x.abs() <= 20.0);
                assert!((0.0..=20.0).contains(&placement.position.y));
            }
        }
    }

    #[test]
    fn test_space_nebula_star_count_and_bounds() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(5);
        build_space_nebula(&mut world, &mut rng);

        let mut star_total = 0;
        for (_, field) in world.query::<&ParticleField>().iter() {
            star_total += field.points.len();
            for point in &field.points {
                assert!(point.max_abs() <= 1000.0);
            }
        }
        assert_eq!(star_total, 10_000);
        assert_eq!(count_kind(&world, PropKind::NebulaShell), 1);
        assert_eq!(count_kind(&world, PropKind::CosmicDebris), 20);
    }

    #[test]
    fn test_default_ground_is_one_plane() {
        let mut world = World::new();
        let entities = build_default_ground(&mut world);
        assert_eq!(entities.len(), 1);
        assert_eq!(count_kind(&world, PropKind::Ground), 1);
    }
}
