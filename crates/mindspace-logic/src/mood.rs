//! Mood scale helpers.
//!
//! Moods are logged on a 1-10 scale before and after each session. The
//! label and color tiers intentionally differ (the color ramp has an
//! extra step) to match the product's visual design.

/// Clamp a raw mood score to the 1-10 scale.
pub fn clamp_mood(score: i32) -> u8 {
    score.clamp(1, 10) as u8
}

/// Display label for a mood score.
pub fn mood_label(score: u8) -> &'static str {
    if score <= 2 {
        "Very Low"
    } else if score <= 4 {
        "Low"
    } else if score <= 6 {
        "Neutral"
    } else if score <= 8 {
        "Good"
    } else {
        "Excellent"
    }
}

/// Emoji for a mood score, used on the post-session card.
pub fn mood_emoji(score: u8) -> &'static str {
    if score <= 2 {
        "😢"
    } else if score <= 4 {
        "😔"
    } else if score <= 6 {
        "😐"
    } else if score <= 8 {
        "🙂"
    } else {
        "😊"
    }
}

/// Accent color (hex) for a mood score.
pub fn mood_color(score: u8) -> &'static str {
    if score <= 3 {
        "#ef4444"
    } else if score <= 5 {
        "#f97316"
    } else if score <= 7 {
        "#eab308"
    } else if score <= 8 {
        "#84cc16"
    } else {
        "#22c55e"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_mood() {
        assert_eq!(clamp_mood(-5), 1);
        assert_eq!(clamp_mood(0), 1);
        assert_eq!(clamp_mood(7), 7);
        assert_eq!(clamp_mood(99), 10);
    }

    #[test]
    fn test_label_tiers() {
        assert_eq!(mood_label(1), "Very Low");
        assert_eq!(mood_label(2), "Very Low");
        assert_eq!(mood_label(3), "Low");
        assert_eq!(mood_label(6), "Neutral");
        assert_eq!(mood_label(8), "Good");
        assert_eq!(mood_label(9), "Excellent");
    }

    #[test]
    fn test_color_tiers_have_extra_step() {
        assert_eq!(mood_color(3), "#ef4444");
        assert_eq!(mood_color(4), "#f97316");
        assert_eq!(mood_color(6), "#eab308");
        assert_eq!(mood_color(8), "#84cc16");
        assert_eq!(mood_color(10), "#22c55e");
    }
}
