//! Simulated media devices - camera and microphone stand-ins.
//!
//! The product never touches real hardware; feeds are synthetic. What
//! matters is the acquisition contract: opening a device can fail with a
//! denial or absence, failure never panics, and a feed released twice
//! stays released. The engine keeps a session alive in degraded form
//! when acquisition fails.

use rand::Rng;

/// Why a device could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaError {
    /// The user (or policy) refused access.
    PermissionDenied,
    /// No such device on this host.
    Unavailable,
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaError::PermissionDenied => write!(f, "media access denied"),
            MediaError::Unavailable => write!(f, "media device unavailable"),
        }
    }
}

impl std::error::Error for MediaError {}

/// A held camera feed. Carries no pixels; it exists so teardown has
/// something concrete to release.
#[derive(Debug)]
pub struct CameraFeed {
    released: bool,
}

impl CameraFeed {
    fn new() -> Self {
        Self { released: false }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the underlying track. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.released = true;
    }
}

/// A held microphone feed exposing a smoothed ambient level, the stand-in
/// for an analyser's averaged frequency data.
#[derive(Debug)]
pub struct MicrophoneFeed {
    level: f32,
    released: bool,
}

/// Upper bound of the synthetic audio level scale.
pub const MAX_AUDIO_LEVEL: f32 = 128.0;

impl MicrophoneFeed {
    fn new(rng: &mut (impl Rng + ?Sized)) -> Self {
        Self {
            level: rng.gen_range(30.0..70.0),
            released: false,
        }
    }

    /// Current level in 0..=128, advanced by a bounded random walk so
    /// consecutive readings stay correlated like real room tone.
    pub fn poll_level(&mut self, rng: &mut impl Rng) -> f32 {
        if self.released {
            return 0.0;
        }
        self.level = (self.level + rng.gen_range(-10.0..10.0)).clamp(0.0, MAX_AUDIO_LEVEL);
        self.level
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) {
        self.released = true;
    }
}

/// Device acquisition seam. The engine and coach depend on this trait so
/// tests can inject denials without touching the engine internals.
pub trait MediaDevices {
    fn open_camera(&mut self, rng: &mut dyn rand::RngCore) -> Result<CameraFeed, MediaError>;
    fn open_microphone(&mut self, rng: &mut dyn rand::RngCore) -> Result<MicrophoneFeed, MediaError>;
}

/// Configurable simulated devices. Defaults to everything present and
/// permitted, the hosted-demo behavior.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    pub camera_present: bool,
    pub camera_permitted: bool,
    pub microphone_present: bool,
    pub microphone_permitted: bool,
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self {
            camera_present: true,
            camera_permitted: true,
            microphone_present: true,
            microphone_permitted: true,
        }
    }
}

impl SimulatedMedia {
    /// A host with no media hardware at all.
    pub fn none() -> Self {
        Self {
            camera_present: false,
            camera_permitted: false,
            microphone_present: false,
            microphone_permitted: false,
        }
    }

    /// Devices exist but every permission prompt is refused.
    pub fn denied() -> Self {
        Self {
            camera_present: true,
            camera_permitted: false,
            microphone_present: true,
            microphone_permitted: false,
        }
    }
}

impl MediaDevices for SimulatedMedia {
    fn open_camera(&mut self, _rng: &mut dyn rand::RngCore) -> Result<CameraFeed, MediaError> {
        if !self.camera_present {
            return Err(MediaError::Unavailable);
        }
        if !self.camera_permitted {
            return Err(MediaError::PermissionDenied);
        }
        Ok(CameraFeed::new())
    }

    fn open_microphone(&mut self, rng: &mut dyn rand::RngCore) -> Result<MicrophoneFeed, MediaError> {
        if !self.microphone_present {
            return Err(MediaError::Unavailable);
        }
        if !self.microphone_permitted {
            return Err(MediaError::PermissionDenied);
        }
        Ok(MicrophoneFeed::new(rng))
    }
}
