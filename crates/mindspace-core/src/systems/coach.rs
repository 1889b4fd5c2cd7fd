//! Voice coach - scheduled guidance lines plus synthetic voice analysis.
//!
//! The coach speaks its environment's script on a randomized cadence and,
//! when a microphone feed is available, derives a calm/neutral/anxious
//! reading from the ambient level once per second. Microphone denial is
//! not fatal: the coach keeps speaking, analysis just stays `None`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::media::{MediaDevices, MicrophoneFeed};
use mindspace_logic::guidance;

/// Seconds from session start to the first spoken line.
const FIRST_LINE_DELAY_SECS: f64 = 5.0;

/// Gap between lines is uniform in this range.
const LINE_GAP_SECS: std::ops::Range<f64> = 30.0..50.0;

/// Seconds between voice analyses while listening.
const ANALYSIS_INTERVAL_SECS: f64 = 1.0;

/// Coarse emotional reading derived from the ambient level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Calm,
    Neutral,
    Anxious,
}

impl EmotionalState {
    pub fn label(self) -> &'static str {
        match self {
            EmotionalState::Calm => "calm",
            EmotionalState::Neutral => "neutral",
            EmotionalState::Anxious => "anxious",
        }
    }
}

/// One second's worth of synthetic voice analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    /// 0..100, inversely proportional to the ambient level.
    pub stress: f32,
    /// Breaths per minute, 12..20.
    pub breathing_rate: f32,
    pub emotional_state: EmotionalState,
    /// 0..100.
    pub stability: f32,
    /// 0..30.
    pub background_noise: f32,
}

impl VoiceAnalysis {
    /// Derive a reading from an ambient audio level (0..=128 scale).
    pub fn from_level(level: f32, rng: &mut impl Rng) -> Self {
        let emotional_state = if level > 50.0 {
            EmotionalState::Calm
        } else if level > 30.0 {
            EmotionalState::Neutral
        } else {
            EmotionalState::Anxious
        };
        Self {
            stress: (100.0 - level * 2.0).max(0.0),
            breathing_rate: 12.0 + rng.gen::<f32>() * 8.0,
            emotional_state,
            stability: (level * 3.0).min(100.0),
            background_noise: rng.gen::<f32>() * 30.0,
        }
    }
}

/// Speaks guidance on a schedule and listens when it can.
#[derive(Debug)]
pub struct VoiceCoach {
    script: &'static [&'static str],
    next_line: usize,
    next_line_at: f64,
    analysis_since: f64,
    mic: Option<MicrophoneFeed>,
    latest_analysis: Option<VoiceAnalysis>,
    active: bool,
}

impl VoiceCoach {
    /// Start coaching for an environment at the given session clock.
    ///
    /// Attempts to open a microphone for voice analysis; on denial or
    /// absence the coach runs in guidance-only mode.
    pub fn start(
        environment_id: &str,
        media: &mut dyn MediaDevices,
        clock_seconds: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let mic = media.open_microphone(rng).ok();
        Self {
            script: guidance::guidance_for(environment_id),
            next_line: 0,
            next_line_at: clock_seconds + FIRST_LINE_DELAY_SECS,
            analysis_since: 0.0,
            mic,
            latest_analysis: None,
            active: true,
        }
    }

    /// Advance the coach. Returns the guidance line to surface when one
    /// is due; schedules the next line 30 to 50 seconds out.
    pub fn update(
        &mut self,
        clock_seconds: f64,
        delta_seconds: f64,
        rng: &mut impl Rng,
    ) -> Option<&'static str> {
        if !self.active {
            return None;
        }

        if let Some(mic) = self.mic.as_mut() {
            self.analysis_since += delta_seconds;
            if self.analysis_since >= ANALYSIS_INTERVAL_SECS {
                self.analysis_since -= ANALYSIS_INTERVAL_SECS;
                let level = mic.poll_level(rng);
                self.latest_analysis = Some(VoiceAnalysis::from_level(level, rng));
            }
        }

        if clock_seconds >= self.next_line_at {
            let line = self.script[self.next_line % self.script.len()];
            self.next_line += 1;
            self.next_line_at = clock_seconds + rng.gen_range(LINE_GAP_SECS);
            return Some(line);
        }
        None
    }

    /// Whether a microphone feed is held.
    pub fn is_listening(&self) -> bool {
        self.mic.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn latest_analysis(&self) -> Option<VoiceAnalysis> {
        self.latest_analysis
    }

    /// Release the microphone and go quiet. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(mic) = self.mic.as_mut() {
            mic.release();
        }
        self.mic = None;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SimulatedMedia;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn drive(coach: &mut VoiceCoach, from: f64, secs: f64, rng: &mut StdRng) -> Vec<&'static str> {
        let mut lines = Vec::new();
        let dt = 1.0 / 60.0;
        let steps = (secs / dt) as usize;
        for step in 0..steps {
            let clock = from + step as f64 * dt;
            if let Some(line) = coach.update(clock, dt, rng) {
                lines.push(line);
            }
        }
        lines
    }

    #[test]
    fn test_first_line_arrives_after_initial_delay() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut media = SimulatedMedia::default();
        let mut coach = VoiceCoach::start("forest-sanctuary", &mut media, 0.0, &mut rng);

        let early = drive(&mut coach, 0.0, 4.9, &mut rng);
        assert!(early.is_empty(), "no guidance before the initial delay");

        let lines = drive(&mut coach, 4.9, 0.5, &mut rng);
        assert_eq!(lines, vec![guidance::guidance_for("forest-sanctuary")[0]]);
    }

    #[test]
    fn test_lines_follow_script_order_and_loop() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut media = SimulatedMedia::default();
        let mut coach = VoiceCoach::start("zen-garden", &mut media, 0.0, &mut rng);

        // Six minutes is enough for the 5-line script to wrap.
        let lines = drive(&mut coach, 0.0, 360.0, &mut rng);
        assert!(lines.len() >= 6, "expected a wrapped script, got {}", lines.len());
        let script = guidance::guidance_for("zen-garden");
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(*line, script[i % script.len()]);
        }
    }

    #[test]
    fn test_mic_denial_degrades_to_guidance_only() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut media = SimulatedMedia::denied();
        let mut coach = VoiceCoach::start("ocean-depths", &mut media, 0.0, &mut rng);

        assert!(!coach.is_listening());
        let lines = drive(&mut coach, 0.0, 10.0, &mut rng);
        assert!(!lines.is_empty(), "guidance must continue without a microphone");
        assert!(coach.latest_analysis().is_none());
    }

    #[test]
    fn test_analysis_updates_once_per_second_while_listening() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut media = SimulatedMedia::default();
        let mut coach = VoiceCoach::start("forest-sanctuary", &mut media, 0.0, &mut rng);
        assert!(coach.is_listening());

        drive(&mut coach, 0.0, 2.0, &mut rng);
        let analysis = coach.latest_analysis().unwrap();
        assert!((0.0..=100.0).contains(&analysis.stress));
        assert!((12.0..=20.0).contains(&analysis.breathing_rate));
        assert!((0.0..=100.0).contains(&analysis.stability));
        assert!((0.0..=30.0).contains(&analysis.background_noise));
    }

    #[test]
    fn test_emotional_state_thresholds() {
        let mut rng = StdRng::seed_from_u64(25);
        assert_eq!(
            VoiceAnalysis::from_level(80.0, &mut rng).emotional_state,
            EmotionalState::Calm
        );
        assert_eq!(
            VoiceAnalysis::from_level(40.0, &mut rng).emotional_state,
            EmotionalState::Neutral
        );
        assert_eq!(
            VoiceAnalysis::from_level(10.0, &mut rng).emotional_state,
            EmotionalState::Anxious
        );
        // Quiet rooms read as high stress, loud ones as zero.
        assert_eq!(VoiceAnalysis::from_level(0.0, &mut rng).stress, 100.0);
        assert_eq!(VoiceAnalysis::from_level(64.0, &mut rng).stress, 0.0);
    }

    #[test]
    fn test_stop_releases_mic_and_silences() {
        let mut rng = StdRng::seed_from_u64(26);
        let mut media = SimulatedMedia::default();
        let mut coach = VoiceCoach::start("forest-sanctuary", &mut media, 0.0, &mut rng);

        coach.stop();
        coach.stop();
        assert!(!coach.is_active());
        assert!(!coach.is_listening());
        assert!(coach.update(100.0, 1.0, &mut rng).is_none());
    }
}
