//! Presentation-mode control for a running session.
//!
//! A session always renders in [`ImmersiveMode::Standard`]; AR and VR are
//! opt-in upgrades gated on the probed [`Capabilities`]. AR additionally
//! needs a live camera feed, which the controller owns for as long as the
//! mode is active. VR never fails: hosts without immersive support get a
//! simulated VR presentation instead.

use rand::RngCore;

use crate::capability::Capabilities;
use crate::media::{CameraFeed, MediaDevices, MediaError};

/// How the scene is currently being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmersiveMode {
    /// Flat on-screen rendering. The mode every session starts in.
    Standard,
    /// Camera passthrough behind the scene.
    Ar,
    /// Head-tracked stereo rendering, or a simulated stand-in when the
    /// host lacks immersive session support.
    Vr { simulated: bool },
}

impl ImmersiveMode {
    pub fn is_immersive(&self) -> bool {
        !matches!(self, ImmersiveMode::Standard)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImmersiveMode::Standard => "standard",
            ImmersiveMode::Ar => "ar",
            ImmersiveMode::Vr { simulated: false } => "vr",
            ImmersiveMode::Vr { simulated: true } => "vr (simulated)",
        }
    }
}

/// Owns the current presentation mode and the camera feed backing AR.
pub struct ImmersiveController {
    mode: ImmersiveMode,
    camera: Option<CameraFeed>,
}

impl ImmersiveController {
    pub fn new() -> Self {
        ImmersiveController {
            mode: ImmersiveMode::Standard,
            camera: None,
        }
    }

    pub fn mode(&self) -> ImmersiveMode {
        self.mode
    }

    pub fn has_camera_feed(&self) -> bool {
        self.camera.is_some()
    }

    /// Switches to AR. Requires camera capability and a grantable camera
    /// feed; on failure the previous mode (and any held feed) is kept.
    pub fn enter_ar(
        &mut self,
        capabilities: &Capabilities,
        media: &mut dyn MediaDevices,
        rng: &mut dyn RngCore,
    ) -> Result<(), MediaError> {
        if !capabilities.ar() {
            return Err(MediaError::Unavailable);
        }
        let feed = media.open_camera(rng)?;
        self.release_camera();
        self.camera = Some(feed);
        self.mode = ImmersiveMode::Ar;
        Ok(())
    }

    /// Switches to VR, simulated when the host lacks immersive sessions.
    /// Any AR camera feed is released on the way in.
    pub fn enter_vr(&mut self, capabilities: &Capabilities) -> ImmersiveMode {
        self.release_camera();
        self.mode = ImmersiveMode::Vr {
            simulated: !capabilities.vr(),
        };
        self.mode
    }

    /// Returns to standard rendering, releasing the camera if one is held.
    /// Safe to call in any mode, any number of times.
    pub fn exit(&mut self) {
        self.release_camera();
        self.mode = ImmersiveMode::Standard;
    }

    fn release_camera(&mut self) {
        if let Some(feed) = self.camera.as_mut() {
            feed.release();
        }
        self.camera = None;
    }
}

impl Default for ImmersiveController {
    fn default() -> Self {
        Self::new()
    }
}
