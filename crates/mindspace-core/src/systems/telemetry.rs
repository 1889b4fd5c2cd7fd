//! Telemetry simulator - synthetic biometric samples at a fixed cadence.
//!
//! There is no device integration anywhere in the product; samples are
//! drawn uniformly from physiologically plausible ranges. The simulator
//! accumulates polled time and emits one sample per elapsed second while
//! running.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seconds between samples.
pub const SAMPLE_INTERVAL_SECS: f64 = 1.0;

/// One synthetic biometric reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricSample {
    /// Beats per minute, 60..100.
    pub heart_rate: f32,
    /// Unitless 0..100.
    pub stress: f32,
    /// Breaths per minute, 12..20.
    pub breathing_rate: f32,
    /// Normalized gaze offsets, each -1..1.
    pub gaze_x: f32,
    pub gaze_y: f32,
    /// Session clock when the sample was taken.
    pub at_secs: f64,
}

impl BiometricSample {
    /// Draw a fresh sample. Every field is independent.
    pub fn draw(rng: &mut impl Rng, at_secs: f64) -> Self {
        Self {
            heart_rate: rng.gen_range(60.0..100.0),
            stress: rng.gen_range(0.0..100.0),
            breathing_rate: rng.gen_range(12.0..20.0),
            gaze_x: rng.gen_range(-1.0..1.0),
            gaze_y: rng.gen_range(-1.0..1.0),
            at_secs,
        }
    }

    /// Whether every field sits inside its documented range.
    pub fn in_range(&self) -> bool {
        (60.0..=100.0).contains(&self.heart_rate)
            && (0.0..=100.0).contains(&self.stress)
            && (12.0..=20.0).contains(&self.breathing_rate)
            && (-1.0..=1.0).contains(&self.gaze_x)
            && (-1.0..=1.0).contains(&self.gaze_y)
    }
}

/// Emits one `BiometricSample` per second of polled time while running.
#[derive(Debug, Clone)]
pub struct TelemetrySimulator {
    running: bool,
    since_last: f64,
}

impl Default for TelemetrySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySimulator {
    pub fn new() -> Self {
        Self {
            running: false,
            since_last: 0.0,
        }
    }

    /// Begin emitting. Starting an already-running simulator is a no-op,
    /// so the accumulated fraction of a second is never lost.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.since_last = 0.0;
        }
    }

    /// Stop emitting. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Accumulate `delta_seconds` and emit a sample if a full interval
    /// has elapsed. At most one sample per call; a stalled caller catches
    /// up over the following polls rather than flooding a single frame.
    pub fn poll(
        &mut self,
        delta_seconds: f64,
        clock_seconds: f64,
        rng: &mut impl Rng,
    ) -> Option<BiometricSample> {
        if !self.running {
            return None;
        }
        self.since_last += delta_seconds;
        if self.since_last < SAMPLE_INTERVAL_SECS {
            return None;
        }
        self.since_last -= SAMPLE_INTERVAL_SECS;
        Some(BiometricSample::draw(rng, clock_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..1000 {
            let sample = BiometricSample::draw(&mut rng, i as f64);
            assert!(sample.in_range(), "out-of-range sample: {:?}", sample);
        }
    }

    #[test]
    fn test_one_sample_per_second_at_frame_rate() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut telemetry = TelemetrySimulator::new();
        telemetry.start();

        // 64 fps: the frame delta is exact in binary, so the count is too.
        let dt = 1.0 / 64.0;
        let mut clock = 0.0;
        let mut samples = 0;
        for _ in 0..(64 * 60) {
            clock += dt;
            if telemetry.poll(dt, clock, &mut rng).is_some() {
                samples += 1;
            }
        }
        // One sample per simulated second over a simulated minute.
        assert_eq!(samples, 60);
    }

    #[test]
    fn test_no_samples_before_start_or_after_stop() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut telemetry = TelemetrySimulator::new();

        assert!(telemetry.poll(5.0, 5.0, &mut rng).is_none());

        telemetry.start();
        assert!(telemetry.poll(1.0, 6.0, &mut rng).is_some());

        telemetry.stop();
        assert!(telemetry.poll(10.0, 16.0, &mut rng).is_none());
    }

    #[test]
    fn test_stop_is_idempotent_and_start_resumes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut telemetry = TelemetrySimulator::new();
        telemetry.start();
        telemetry.stop();
        telemetry.stop();
        assert!(!telemetry.is_running());

        telemetry.start();
        assert!(telemetry.is_running());
        assert!(telemetry.poll(1.0, 1.0, &mut rng).is_some());
    }

    #[test]
    fn test_double_start_does_not_reset_accumulator() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut telemetry = TelemetrySimulator::new();
        telemetry.start();
        assert!(telemetry.poll(0.75, 0.75, &mut rng).is_none());
        telemetry.start();
        // 0.75 + 0.5 crosses the interval; the stray start lost nothing.
        assert!(telemetry.poll(0.5, 1.25, &mut rng).is_some());
    }
}
