//! Session engine - main entry point for running a meditation session.

use hecs::World;
use rand::Rng;

use crate::capability::Capabilities;
use crate::generation::{build_scene, clear_scene, Scene};
use crate::immersive::{ImmersiveController, ImmersiveMode};
use crate::media::{MediaDevices, MediaError};
use crate::systems::*;
use mindspace_logic::session::{SessionPhase, SessionTimer};

/// Countdown granularity. The timer counts whole seconds regardless of
/// frame rate.
const COUNTDOWN_INTERVAL_SECS: f64 = 1.0;

/// Which environment to run and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub environment_id: String,
    pub duration_secs: u32,
}

impl SessionConfig {
    pub fn new(environment_id: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            environment_id: environment_id.into(),
            duration_secs,
        }
    }

    /// Catalogue durations are listed in minutes; convert at the edge.
    pub fn from_minutes(environment_id: impl Into<String>, minutes: u32) -> Self {
        Self::new(environment_id, minutes * 60)
    }
}

/// Something the session surfaced during an update, in the order it
/// happened. Drained by the caller once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A fresh biometric sample was taken and absorbed into the metrics.
    Biometric(BiometricSample),
    /// The coach spoke a guidance line.
    Guidance(&'static str),
    /// The countdown reached its target. Emitted exactly once per session.
    Completed,
}

/// Drives one meditation session end to end.
///
/// The engine owns the scene world and everything that moves during a
/// session: the animation systems run every frame, while telemetry and
/// the countdown each keep their own 1 Hz cadence so frame rate never
/// changes how fast a session runs.
pub struct SessionEngine {
    /// ECS world containing every scene prop.
    pub world: World,
    /// The scene built for the configured environment.
    scene: Scene,
    /// Host capabilities probed before the session started.
    capabilities: Capabilities,
    /// Countdown state machine.
    timer: SessionTimer,
    /// Target length, handed to the timer on `begin`.
    duration_secs: u32,
    /// Simulated biometric source.
    telemetry: TelemetrySimulator,
    /// Live session metrics fed by telemetry.
    metrics: SessionMetrics,
    /// Guidance and voice analysis, present once the session begins.
    coach: Option<VoiceCoach>,
    /// AR/VR presentation state.
    immersive: ImmersiveController,
    /// Events accumulated since the last drain.
    events: Vec<EngineEvent>,

    // Update timing
    clock: f64,
    countdown_accum: f64,
}

impl SessionEngine {
    /// Create an engine and build the configured scene immediately.
    ///
    /// The session itself does not start until [`begin`](Self::begin),
    /// so the scene can be shown (and animated) behind a start screen.
    pub fn new(config: SessionConfig, capabilities: Capabilities, rng: &mut impl Rng) -> Self {
        let mut world = World::new();
        let scene = build_scene(&mut world, &config.environment_id, rng);
        Self {
            world,
            scene,
            capabilities,
            timer: SessionTimer::new(),
            duration_secs: config.duration_secs,
            telemetry: TelemetrySimulator::new(),
            metrics: SessionMetrics::default(),
            coach: None,
            immersive: ImmersiveController::new(),
            events: Vec::new(),
            clock: 0.0,
            countdown_accum: 0.0,
        }
    }

    /// Start the countdown, telemetry, and the voice coach. Only valid
    /// once; a second call while a session is underway is ignored.
    pub fn begin(&mut self, media: &mut dyn MediaDevices, rng: &mut impl Rng) {
        if self.timer.phase() != SessionPhase::Idle {
            return;
        }
        self.timer.start(self.duration_secs);
        self.telemetry.start();
        self.coach = Some(VoiceCoach::start(
            &self.scene.environment_id,
            media,
            self.clock,
            rng,
        ));
    }

    /// Advance the session by `delta_seconds` of wall time.
    ///
    /// Animation runs every call. Telemetry samples at 1 Hz for as long
    /// as the session is active, paused or not. The countdown and the
    /// coach only move while the timer is Running.
    pub fn update(&mut self, delta_seconds: f32, rng: &mut impl Rng) {
        let delta_seconds = delta_seconds.max(0.0);
        let dt = f64::from(delta_seconds);
        self.clock += dt;

        // Animation (every frame)
        spin_system(&mut self.world, delta_seconds);
        bob_system(&mut self.world, self.clock);
        wave_system(&mut self.world, self.clock);

        // Telemetry (1 Hz, own accumulator)
        if let Some(sample) = self.telemetry.poll(dt, self.clock, rng) {
            self.metrics.absorb(&sample);
            self.metrics.drift(rng);
            self.events.push(EngineEvent::Biometric(sample));
        }

        if self.timer.is_running() {
            // Guidance and voice analysis
            if let Some(coach) = self.coach.as_mut() {
                if let Some(line) = coach.update(self.clock, dt, rng) {
                    self.events.push(EngineEvent::Guidance(line));
                }
            }

            // Countdown (1 Hz, own accumulator)
            self.countdown_accum += dt;
            while self.countdown_accum >= COUNTDOWN_INTERVAL_SECS {
                self.countdown_accum -= COUNTDOWN_INTERVAL_SECS;
                if self.timer.tick(1) {
                    self.finish();
                    break;
                }
            }
        }
    }

    /// Completion teardown: the scene stays up for the summary screen,
    /// but nothing emits after the `Completed` event.
    fn finish(&mut self) {
        self.telemetry.stop();
        if let Some(coach) = self.coach.as_mut() {
            coach.stop();
        }
        self.events.push(EngineEvent::Completed);
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.resume();
    }

    /// Flip Running <-> Paused.
    pub fn toggle(&mut self) {
        self.timer.toggle();
    }

    /// Switch to AR rendering. Fails without a camera; the session keeps
    /// running in the current mode on failure.
    pub fn enter_ar(
        &mut self,
        media: &mut dyn MediaDevices,
        rng: &mut impl Rng,
    ) -> Result<(), MediaError> {
        self.immersive.enter_ar(&self.capabilities, media, rng)
    }

    /// Switch to VR rendering, simulated when the host has no immersive
    /// session support.
    pub fn enter_vr(&mut self) -> ImmersiveMode {
        self.immersive.enter_vr(&self.capabilities)
    }

    /// Back to standard rendering.
    pub fn exit_immersive(&mut self) {
        self.immersive.exit();
    }

    /// Take every event accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop everything and despawn the scene. Safe to call in any state,
    /// any number of times.
    pub fn shutdown(&mut self) {
        self.telemetry.stop();
        if let Some(coach) = self.coach.as_mut() {
            coach.stop();
        }
        self.coach = None;
        self.immersive.exit();
        clear_scene(&mut self.world, &mut self.scene);
        self.timer.reset();
        self.countdown_accum = 0.0;
    }

    /// Seconds of wall time since the engine was created.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn phase(&self) -> SessionPhase {
        self.timer.phase()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining_secs()
    }

    /// Countdown completion fraction in [0, 1].
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn environment_id(&self) -> &str {
        &self.scene.environment_id
    }

    /// True when the environment had no registered builder and the
    /// default ground scene is showing.
    pub fn is_fallback_scene(&self) -> bool {
        self.scene.is_fallback
    }

    pub fn prop_count(&self) -> usize {
        self.scene.prop_count()
    }

    pub fn immersive_mode(&self) -> ImmersiveMode {
        self.immersive.mode()
    }

    /// Latest voice analysis, if the coach holds a microphone.
    pub fn voice_analysis(&self) -> Option<VoiceAnalysis> {
        self.coach.as_ref().and_then(|coach| coach.latest_analysis())
    }

    pub fn is_coach_listening(&self) -> bool {
        self.coach
            .as_ref()
            .is_some_and(|coach| coach.is_listening())
    }
}
