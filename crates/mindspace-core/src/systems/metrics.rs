//! Session metrics - the live wellness numbers shown during a session.
//!
//! Physiological fields mirror the latest telemetry sample; focus and
//! mindfulness evolve by a bounded random walk so the display breathes
//! without device input. Both walks clamp to [0, 100].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::telemetry::BiometricSample;

/// Largest single-step change in the focus walk.
const FOCUS_STEP: f32 = 5.0;

/// Largest single-step change in the mindfulness walk.
const MINDFULNESS_STEP: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub heart_rate: f32,
    pub stress: f32,
    pub breathing_rate: f32,
    /// 0..100, random walk.
    pub focus: f32,
    /// 0..100, random walk.
    pub mindfulness: f32,
}

impl Default for SessionMetrics {
    /// Resting baseline shown before the first sample arrives.
    fn default() -> Self {
        Self {
            heart_rate: 72.0,
            stress: 45.0,
            breathing_rate: 16.0,
            focus: 85.0,
            mindfulness: 78.0,
        }
    }
}

impl SessionMetrics {
    /// Take the physiological fields from a telemetry sample.
    pub fn absorb(&mut self, sample: &BiometricSample) {
        self.heart_rate = sample.heart_rate;
        self.stress = sample.stress;
        self.breathing_rate = sample.breathing_rate;
    }

    /// Advance the focus and mindfulness walks one step.
    pub fn drift(&mut self, rng: &mut impl Rng) {
        self.focus = (self.focus + rng.gen_range(-FOCUS_STEP..FOCUS_STEP)).clamp(0.0, 100.0);
        self.mindfulness = (self.mindfulness
            + rng.gen_range(-MINDFULNESS_STEP..MINDFULNESS_STEP))
        .clamp(0.0, 100.0);
    }
}
