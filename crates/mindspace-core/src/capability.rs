//! Capability probe - what the host can do, asked exactly once.
//!
//! The record is a plain value: probe it at startup, hand copies to
//! whoever needs one. Nothing in the engine re-probes mid-session, so a
//! session's feature set is stable from begin to teardown.

use serde::{Deserialize, Serialize};

/// Host feature flags the probe reads.
pub trait Host {
    fn immersive_session(&self) -> bool;
    fn camera(&self) -> bool;
    fn microphone(&self) -> bool;
    fn motion_sensor(&self) -> bool;
}

/// Snapshot of host capabilities taken at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub immersive_session: bool,
    pub camera: bool,
    pub microphone: bool,
    pub motion_sensor: bool,
}

impl Capabilities {
    /// Read every flag from the host once.
    pub fn probe(host: &dyn Host) -> Self {
        Self {
            immersive_session: host.immersive_session(),
            camera: host.camera(),
            microphone: host.microphone(),
            motion_sensor: host.motion_sensor(),
        }
    }

    /// True immersive VR is available.
    pub fn vr(&self) -> bool {
        self.immersive_session
    }

    /// AR needs a camera to composite over.
    pub fn ar(&self) -> bool {
        self.camera
    }
}

/// A host with explicit flags, for tests and the simtest harness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedHost {
    pub immersive_session: bool,
    pub camera: bool,
    pub microphone: bool,
    pub motion_sensor: bool,
}

impl SimulatedHost {
    /// Everything available.
    pub fn full() -> Self {
        Self {
            immersive_session: true,
            camera: true,
            microphone: true,
            motion_sensor: true,
        }
    }
}

impl Host for SimulatedHost {
    fn immersive_session(&self) -> bool {
        self.immersive_session
    }
    fn camera(&self) -> bool {
        self.camera
    }
    fn microphone(&self) -> bool {
        self.microphone
    }
    fn motion_sensor(&self) -> bool {
        self.motion_sensor
    }
}

/// Reads capabilities from `MINDSPACE_*` environment variables, the
/// desktop viewer's way of simulating different hosts. Unset variables
/// mean the feature is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvHost;

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

impl Host for EnvHost {
    fn immersive_session(&self) -> bool {
        env_flag("MINDSPACE_XR")
    }
    fn camera(&self) -> bool {
        env_flag("MINDSPACE_CAMERA")
    }
    fn microphone(&self) -> bool {
        env_flag("MINDSPACE_MIC")
    }
    fn motion_sensor(&self) -> bool {
        env_flag("MINDSPACE_MOTION")
    }
}
