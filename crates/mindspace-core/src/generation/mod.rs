//! Generation - procedural creation of meditation scenes.
//!
//! Each environment id maps to a builder function through a registry
//! table. Ids without a builder (including two catalogue environments
//! that reuse the plain scene) get the default ground plane, so building
//! never fails regardless of input.

mod environments;

pub use environments::*;

use hecs::{Entity, World};
use rand::{Rng, RngCore};

/// A scene builder: spawns an environment's props into the world and
/// returns them. All builders share one signature so they fit the table.
pub type BuilderFn = fn(&mut World, &mut dyn RngCore) -> Vec<Entity>;

/// Environment id -> builder. Order matches the catalogue, absent ids
/// fall back to the default ground scene.
const BUILDERS: &[(&str, BuilderFn)] = &[
    ("forest-sanctuary", build_forest_sanctuary),
    ("crystal-cave", build_crystal_cave),
    ("ocean-depths", build_ocean_depths),
    ("space-nebula", build_space_nebula),
];

/// Look up the registered builder for an environment id.
pub fn builder_for(environment_id: &str) -> Option<BuilderFn> {
    BUILDERS
        .iter()
        .find(|(id, _)| *id == environment_id)
        .map(|(_, builder)| *builder)
}

/// Everything one build call spawned, for rendering and teardown.
#[derive(Debug, Clone)]
pub struct Scene {
    /// The id the scene was requested with (not the builder that ran).
    pub environment_id: String,
    /// True when no builder was registered and the default scene ran.
    pub is_fallback: bool,
    pub entities: Vec<Entity>,
}

impl Scene {
    pub fn prop_count(&self) -> usize {
        self.entities.len()
    }
}

/// Build the scene for an environment id.
///
/// Unknown ids are not an error: they produce the default ground scene
/// with `is_fallback` set, and the scene is never empty.
pub fn build_scene(world: &mut World, environment_id: &str, rng: &mut impl Rng) -> Scene {
    match builder_for(environment_id) {
        Some(builder) => Scene {
            environment_id: environment_id.to_string(),
            is_fallback: false,
            entities: builder(world, rng),
        },
        None => Scene {
            environment_id: environment_id.to_string(),
            is_fallback: true,
            entities: build_default_ground(world),
        },
    }
}

/// Despawn everything the scene spawned. Draining makes a second call a
/// no-op, and entities already gone are skipped rather than treated as
/// errors.
pub fn clear_scene(world: &mut World, scene: &mut Scene) {
    for entity in scene.entities.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_registered_builder_spawns_props() {
        for (id, _) in BUILDERS {
            let mut world = World::new();
            let mut rng = StdRng::seed_from_u64(7);
            let scene = build_scene(&mut world, id, &mut rng);
            assert!(!scene.is_fallback, "{} should have its own builder", id);
            assert!(scene.prop_count() > 0, "{} built an empty scene", id);
            assert_eq!(world.len() as usize, scene.prop_count());
        }
    }

    #[test]
    fn test_unknown_id_builds_fallback_not_nothing() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let scene = build_scene(&mut world, "volcano-core", &mut rng);
        assert!(scene.is_fallback);
        assert!(scene.prop_count() > 0);
        assert_eq!(scene.environment_id, "volcano-core");
    }

    #[test]
    fn test_catalogue_ids_without_builders_use_fallback() {
        for id in ["zen-garden", "aurora-peaks"] {
            let mut world = World::new();
            let mut rng = StdRng::seed_from_u64(7);
            let scene = build_scene(&mut world, id, &mut rng);
            assert!(scene.is_fallback, "{} reuses the default scene", id);
        }
    }

    #[test]
    fn test_clear_scene_empties_world_and_is_idempotent() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = build_scene(&mut world, "forest-sanctuary", &mut rng);
        assert!(world.len() > 0);

        clear_scene(&mut world, &mut scene);
        assert_eq!(world.len(), 0);
        assert_eq!(scene.prop_count(), 0);

        // Second clear must not panic or despawn anything else.
        clear_scene(&mut world, &mut scene);
        assert_eq!(world.len(), 0);
    }
}
