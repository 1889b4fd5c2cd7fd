//! Voice-coach guidance scripts.
//!
//! Each scripted environment carries five lines spoken over the course of
//! a session. Environments without a script of their own (aurora-peaks,
//! and anything unknown) fall back to the zen-garden script, so
//! `guidance_for` never fails.

/// Script used when an environment has no lines of its own.
pub const FALLBACK_SCRIPT_ID: &str = "zen-garden";

const FOREST_SANCTUARY: &[&str] = &[
    "Feel the gentle breeze rustling through the leaves around you.",
    "Breathe in the fresh forest air, and let nature's energy fill your lungs.",
    "Imagine roots growing from your feet, connecting you to the earth.",
    "Listen to the peaceful sounds of flowing water in the distance.",
    "Feel completely safe and protected in this natural sanctuary.",
];

const CRYSTAL_CAVE: &[&str] = &[
    "Allow the crystal energy to flow through your body, cleansing and healing.",
    "Visualize brilliant light emanating from the crystals, surrounding you with peace.",
    "Feel the ancient wisdom of the earth supporting your meditation.",
    "Let the harmonic vibrations of the crystals align your chakras.",
    "Experience the profound stillness found deep within the earth.",
];

const OCEAN_DEPTHS: &[&str] = &[
    "Let the rhythm of the waves guide your breathing naturally.",
    "Feel yourself floating peacefully in the vast, gentle ocean.",
    "Allow the water to wash away all tension and stress from your body.",
    "Connect with the ancient wisdom of the sea.",
    "Feel the supportive embrace of the ocean surrounding you completely.",
];

const SPACE_NEBULA: &[&str] = &[
    "Expand your consciousness into the infinite cosmos around you.",
    "Feel yourself floating weightlessly among the stars.",
    "Let the cosmic energy fill you with wonder and perspective.",
    "Connect with the vastness of the universe and your place within it.",
    "Experience the profound peace of infinite space.",
];

const ZEN_GARDEN: &[&str] = &[
    "Feel the simplicity and order of this peaceful space.",
    "Let go of complexity and find beauty in minimalism.",
    "Breathe with the rhythm of the bamboo fountain.",
    "Feel the careful balance and harmony in every element around you.",
    "Experience the deep tranquility that comes from mindful simplicity.",
];

/// Guidance script for an environment id, with the universal fallback.
pub fn guidance_for(environment_id: &str) -> &'static [&'static str] {
    match environment_id {
        "forest-sanctuary" => FOREST_SANCTUARY,
        "crystal-cave" => CRYSTAL_CAVE,
        "ocean-depths" => OCEAN_DEPTHS,
        "space-nebula" => SPACE_NEBULA,
        "zen-garden" => ZEN_GARDEN,
        _ => ZEN_GARDEN,
    }
}

/// Whether an environment has a script of its own rather than the fallback.
pub fn has_own_script(environment_id: &str) -> bool {
    matches!(
        environment_id,
        "forest-sanctuary" | "crystal-cave" | "ocean-depths" | "space-nebula" | "zen-garden"
    )
}
