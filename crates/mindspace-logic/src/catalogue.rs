//! The meditation environment catalogue.
//!
//! Six hand-tuned environments with fixed ids, allowed session durations,
//! and ambience metadata. The catalogue is static data: lookups never fail
//! loudly, unknown ids simply return `None` and callers fall back to the
//! default scene or redirect to the catalogue page.

use serde::{Deserialize, Serialize};

/// Broad grouping used by the catalogue filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nature,
    Space,
    Urban,
    Abstract,
}

impl Category {
    /// Display name for the filter chip.
    pub fn label(self) -> &'static str {
        match self {
            Category::Nature => "Nature",
            Category::Space => "Space",
            Category::Urban => "Urban",
            Category::Abstract => "Abstract",
        }
    }

    /// All categories in catalogue-page order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Nature,
            Category::Space,
            Category::Urban,
            Category::Abstract,
        ]
    }
}

/// One entry in the environment catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    /// Stable identifier, also the scene-builder registry key.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Selectable session lengths in minutes, ascending.
    pub durations: &'static [u32],
    pub benefits: &'static [&'static str],
    /// Premium environments require an upgraded account.
    pub premium: bool,
    /// Accent color as a `#rrggbb` hex string.
    pub color: &'static str,
    /// Ambient soundscape names. Metadata only; playback is out of scope.
    pub sounds: &'static [&'static str],
}

impl Environment {
    /// Whether `minutes` is one of this environment's selectable durations.
    pub fn allows_duration(&self, minutes: u32) -> bool {
        self.durations.contains(&minutes)
    }

    /// Shortest selectable duration in minutes.
    pub fn shortest_duration(&self) -> u32 {
        self.durations.first().copied().unwrap_or(0)
    }
}

/// The full catalogue, in display order.
pub const ENVIRONMENTS: &[Environment] = &[
    Environment {
        id: "forest-sanctuary",
        name: "Forest Sanctuary",
        description: "Immerse yourself in a peaceful forest with flowing water and gentle wildlife sounds",
        category: Category::Nature,
        durations: &[5, 10, 15, 20, 30],
        benefits: &["Stress Relief", "Focus", "Grounding"],
        premium: false,
        color: "#10b981",
        sounds: &["flowing-water", "birds", "wind-through-trees"],
    },
    Environment {
        id: "crystal-cave",
        name: "Crystal Cave",
        description: "Discover tranquility in a mystical cave filled with glowing crystals and resonant tones",
        category: Category::Abstract,
        durations: &[10, 15, 20, 30],
        benefits: &["Deep Relaxation", "Clarity", "Energy Healing"],
        premium: true,
        color: "#a855f7",
        sounds: &["crystal-bowl", "ambient-drone", "cave-echoes"],
    },
    Environment {
        id: "ocean-depths",
        name: "Ocean Depths",
        description: "Dive deep into the calming embrace of the ocean with gentle waves and marine life",
        category: Category::Nature,
        durations: &[5, 10, 15, 20, 25],
        benefits: &["Emotional Balance", "Peace", "Flow State"],
        premium: false,
        color: "#0ea5e9",
        sounds: &["ocean-waves", "dolphins", "underwater-ambience"],
    },
    Environment {
        id: "space-nebula",
        name: "Cosmic Nebula",
        description: "Float through the infinite cosmos surrounded by colorful nebulae and distant stars",
        category: Category::Space,
        durations: &[10, 15, 20, 30, 45],
        benefits: &["Perspective", "Wonder", "Transcendence"],
        premium: true,
        color: "#6366f1",
        sounds: &["cosmic-ambience", "stellar-winds", "deep-space"],
    },
    Environment {
        id: "zen-garden",
        name: "Zen Garden",
        description: "Find inner peace in a traditional Japanese garden with bamboo and flowing water",
        category: Category::Nature,
        durations: &[5, 10, 15, 20],
        benefits: &["Mindfulness", "Calm", "Present Moment"],
        premium: false,
        color: "#059669",
        sounds: &["bamboo-fountain", "wind-chimes", "gentle-breeze"],
    },
    Environment {
        id: "aurora-peaks",
        name: "Aurora Mountain",
        description: "Witness the dancing northern lights above snow-capped mountain peaks",
        category: Category::Nature,
        durations: &[10, 15, 20, 30],
        benefits: &["Inspiration", "Awe", "Connection"],
        premium: true,
        color: "#06b6d4",
        sounds: &["mountain-wind", "aurora-tones", "distant-wildlife"],
    },
];

/// Look up an environment by id. Unknown ids are a normal `None`.
pub fn find(id: &str) -> Option<&'static Environment> {
    ENVIRONMENTS.iter().find(|env| env.id == id)
}

/// All environments in a given category.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static Environment> {
    ENVIRONMENTS.iter().filter(move |env| env.category == category)
}

/// Number of environments in a category, for the filter chips.
pub fn category_count(category: Category) -> usize {
    by_category(category).count()
}

/// Validate an (environment, duration) selection.
///
/// Returns the environment on success so callers do not race a second
/// lookup against the validation.
pub fn validate_selection(id: &str, minutes: u32) -> Result<&'static Environment, SelectionError> {
    let env = find(id).ok_or(SelectionError::UnknownEnvironment)?;
    if !env.allows_duration(minutes) {
        return Err(SelectionError::DurationNotOffered);
    }
    Ok(env)
}

/// Why a session selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    UnknownEnvironment,
    DurationNotOffered,
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::UnknownEnvironment => write!(f, "unknown environment id"),
            SelectionError::DurationNotOffered => {
                write!(f, "duration is not offered by this environment")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Rotating one-line mindfulness prompts shown on the dashboard.
pub const DAILY_INSIGHTS: &[&str] = &[
    "Today's focus: Cultivate gratitude for three things in your life.",
    "Mindfulness tip: Take three deep breaths before starting any new task.",
    "Reflection: What emotion am I feeling right now, and where do I feel it in my body?",
    "Practice: Set an intention for how you want to show up in the world today.",
    "Awareness: Notice the sounds around you for 30 seconds without judgment.",
    "Compassion: Send loving-kindness to someone who challenged you recently.",
    "Presence: Eat your next meal with full attention to taste, texture, and aroma.",
];

/// Insight for a given day ordinal (e.g. day-of-year), rotating through the list.
pub fn daily_insight(day_ordinal: u32) -> &'static str {
    DAILY_INSIGHTS[day_ordinal as usize % DAILY_INSIGHTS.len()]
}
