//! Systems - per-frame animation and per-second simulation logic

pub mod animate;
pub mod coach;
pub mod metrics;
pub mod telemetry;

pub use animate::{bob_system, spin_system, wave_system};
pub use coach::{EmotionalState, VoiceAnalysis, VoiceCoach};
pub use metrics::SessionMetrics;
pub use telemetry::{BiometricSample, TelemetrySimulator};
