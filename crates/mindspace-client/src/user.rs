//! User records and the canned fixtures behind the mock auth service.
//!
//! Records serialize with camelCase keys so the persisted session file
//! matches the wire shape the eventual backend will speak.

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use mindspace_logic::progress;

/// Lifetime meditation statistics carried on the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationStats {
    pub total_sessions: u32,
    pub total_minutes: u32,
    pub streak_days: u32,
    pub current_level: u32,
    pub favorite_environment: String,
}

impl MeditationStats {
    /// Fold one completed session into the lifetime stats. The level is
    /// recomputed from total minutes rather than incremented, so it can
    /// never drift from the progress rules.
    pub fn record_session(&mut self, minutes: u32) {
        self.total_sessions += 1;
        self.total_minutes += minutes;
        self.streak_days += 1;
        self.current_level = progress::level_for_minutes(self.total_minutes);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
    /// "HH:MM" daily reminder, unset when reminders are off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
            reminder_time: None,
        }
    }
}

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub meditation_stats: MeditationStats,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
}

fn avatar_for(email: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", email)
}

/// The canned account every login resolves to: an established meditator
/// with history behind them. The display name is the email local part.
pub fn demo_user(email: &str) -> User {
    let name = email.split('@').next().unwrap_or(email);
    User {
        id: "1".to_string(),
        email: email.to_string(),
        name: name.to_string(),
        avatar: Some(avatar_for(email)),
        meditation_stats: MeditationStats {
            total_sessions: 23,
            total_minutes: 487,
            streak_days: 7,
            current_level: 3,
            favorite_environment: "forest".to_string(),
        },
        preferences: Preferences {
            theme: Theme::Light,
            notifications: true,
            reminder_time: Some("09:00".to_string()),
        },
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}

const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Base-36 id for a brand-new account.
pub fn random_user_id(rng: &mut impl Rng) -> String {
    (0..ID_LEN)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

/// A brand-new account created by signup: no history, level 1.
pub fn fresh_user(email: &str, name: &str, rng: &mut impl Rng) -> User {
    User {
        id: random_user_id(rng),
        email: email.to_string(),
        name: name.to_string(),
        avatar: Some(avatar_for(email)),
        meditation_stats: MeditationStats {
            total_sessions: 0,
            total_minutes: 0,
            streak_days: 0,
            current_level: 1,
            favorite_environment: "forest".to_string(),
        },
        preferences: Preferences {
            theme: Theme::Light,
            notifications: true,
            reminder_time: None,
        },
        created_at: Utc::now(),
    }
}
