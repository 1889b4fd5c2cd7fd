//! Level, experience, streak, and weekly-goal math.
//!
//! All progression derives from two counters on the user record: total
//! completed sessions and total meditated minutes. Nothing here touches
//! storage; the client store calls these when a session completes.

use serde::{Deserialize, Serialize};

/// Minutes of meditation per level. Level up every two hours.
pub const MINUTES_PER_LEVEL: u32 = 120;

/// Default weekly session goal shown on the dashboard.
pub const DEFAULT_WEEKLY_GOAL: u32 = 5;

/// Level for a lifetime minute count. Starts at level 1.
pub fn level_for_minutes(total_minutes: u32) -> u32 {
    total_minutes / MINUTES_PER_LEVEL + 1
}

/// Progress within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// Minutes accumulated inside the current level.
    pub current: u32,
    /// Minutes needed to finish the level.
    pub required: u32,
}

impl Experience {
    pub fn percent(self) -> f32 {
        if self.required == 0 {
            return 0.0;
        }
        (self.current as f32 / self.required as f32 * 100.0).min(100.0)
    }
}

/// Experience toward the next level for a lifetime minute count.
pub fn experience(total_minutes: u32) -> Experience {
    let level = level_for_minutes(total_minutes);
    let level_floor = (level - 1) * MINUTES_PER_LEVEL;
    Experience {
        current: total_minutes - level_floor,
        required: MINUTES_PER_LEVEL,
    }
}

/// Weekly goal completion as a percentage, capped at 100.
pub fn weekly_progress(sessions_this_week: u32, weekly_goal: u32) -> f32 {
    if weekly_goal == 0 {
        return 100.0;
    }
    (sessions_this_week as f32 / weekly_goal as f32 * 100.0).min(100.0)
}

/// Human duration: "2h 7m" over an hour, "45m" under.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, remaining)
    } else {
        format!("{}m", remaining)
    }
}

/// Encouragement line for a streak length.
pub fn streak_message(streak_days: u32) -> &'static str {
    if streak_days == 0 {
        "Start your journey today!"
    } else if streak_days < 7 {
        "Building momentum!"
    } else if streak_days < 30 {
        "Great consistency!"
    } else if streak_days < 100 {
        "Incredible dedication!"
    } else {
        "Meditation master!"
    }
}

/// An intention the user picks before a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGoal {
    pub id: &'static str,
    pub label: &'static str,
}

/// The selectable pre-session intentions, in display order.
pub const SESSION_GOALS: &[SessionGoal] = &[
    SessionGoal { id: "relaxation", label: "Stress Relief" },
    SessionGoal { id: "focus", label: "Improve Focus" },
    SessionGoal { id: "sleep", label: "Better Sleep" },
    SessionGoal { id: "mindfulness", label: "Mindfulness" },
    SessionGoal { id: "anxiety", label: "Reduce Anxiety" },
    SessionGoal { id: "creativity", label: "Boost Creativity" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_minutes(0), 1);
        assert_eq!(level_for_minutes(119), 1);
        assert_eq!(level_for_minutes(120), 2);
        assert_eq!(level_for_minutes(487), 5);
        assert_eq!(level_for_minutes(1200), 11);
    }

    #[test]
    fn test_experience_within_level() {
        let xp = experience(130);
        assert_eq!(xp.current, 10);
        assert_eq!(xp.required, 120);

        let xp = experience(0);
        assert_eq!(xp.current, 0);

        // Exactly at a boundary the new level starts empty.
        let xp = experience(240);
        assert_eq!(xp.current, 0);
        assert_eq!(level_for_minutes(240), 3);
    }

    #[test]
    fn test_experience_percent() {
        assert!((experience(60).percent() - 50.0).abs() < 0.001);
        assert_eq!(experience(0).percent(), 0.0);
    }

    #[test]
    fn test_weekly_progress_caps_at_hundred() {
        assert_eq!(weekly_progress(0, 5), 0.0);
        assert!((weekly_progress(3, 5) - 60.0).abs() < 0.001);
        assert_eq!(weekly_progress(9, 5), 100.0);
        assert_eq!(weekly_progress(3, 0), 100.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h 0m");
        assert_eq!(format_duration(127), "2h 7m");
    }

    #[test]
    fn test_streak_message_tiers() {
        assert_eq!(streak_message(0), "Start your journey today!");
        assert_eq!(streak_message(6), "Building momentum!");
        assert_eq!(streak_message(7), "Great consistency!");
        assert_eq!(streak_message(29), "Great consistency!");
        assert_eq!(streak_message(30), "Incredible dedication!");
        assert_eq!(streak_message(100), "Meditation master!");
    }

    #[test]
    fn test_session_goals_unique() {
        for (i, a) in SESSION_GOALS.iter().enumerate() {
            for b in &SESSION_GOALS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(SESSION_GOALS.len(), 6);
    }
}
