//! MindSpace Core - Meditation Session Engine
//!
//! An ECS-based engine for immersive meditation sessions: each environment
//! is procedurally built into a scene world, animated per frame, and
//! accompanied by simulated biometric telemetry, session metrics, and a
//! voice coach, all driven from one `update` call.
//!
//! # Architecture
//!
//! The scene uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: Trees, crystals, orbs, bubbles, star fields, wave surfaces
//! - **Components**: Pure data (Placement, Prop, Spin, Bob, WaveSurface, ...)
//! - **Systems**: Per-frame animation and per-second telemetry/countdown
//!
//! # Example
//!
//! ```rust,no_run
//! use mindspace_core::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let mut media = SimulatedMedia::default();
//! let config = SessionConfig::new("forest-sanctuary", 600);
//! let mut engine = SessionEngine::new(config, Capabilities::default(), &mut rng);
//!
//! engine.begin(&mut media, &mut rng);
//! loop {
//!     engine.update(1.0 / 60.0, &mut rng); // 60 FPS
//!     for event in engine.drain_events() {
//!         // react to biometrics, guidance, completion
//!     }
//! }
//! ```

pub mod capability;
pub mod components;
pub mod engine;
pub mod generation;
pub mod immersive;
pub mod media;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::capability::{Capabilities, EnvHost, Host, SimulatedHost};
    pub use crate::components::*;
    pub use crate::engine::{EngineEvent, SessionConfig, SessionEngine};
    pub use crate::immersive::ImmersiveMode;
    pub use crate::media::{MediaDevices, SimulatedMedia};
    pub use crate::systems::telemetry::BiometricSample;
}
