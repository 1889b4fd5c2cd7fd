//! The session timer state machine.
//!
//! A session moves Idle -> Running -> (Paused <-> Running) -> Completed.
//! Elapsed time is counted in whole seconds by explicit `tick` calls, so
//! the machine itself holds no clock and pause/resume can never
//! double-count or skip a second. Completion fires exactly once.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a meditation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session underway.
    Idle,
    /// Counting down toward the target.
    Running,
    /// Frozen mid-session; elapsed time is retained.
    Paused,
    /// Target reached. Sticky until `reset`.
    Completed,
}

/// Tick-driven countdown toward a fixed target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    phase: SessionPhase,
    elapsed_secs: u32,
    target_secs: u32,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            elapsed_secs: 0,
            target_secs: 0,
        }
    }

    /// Begin a session of `target_secs`. Only valid from Idle; any other
    /// phase ignores the call so a stray double-start cannot clobber a
    /// session in progress.
    pub fn start(&mut self, target_secs: u32) {
        if self.phase != SessionPhase::Idle {
            return;
        }
        self.phase = SessionPhase::Running;
        self.elapsed_secs = 0;
        self.target_secs = target_secs;
    }

    /// Flip Running <-> Paused. No effect in Idle or Completed.
    pub fn toggle(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            other => other,
        };
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Running;
        }
    }

    /// Advance the countdown by `secs` whole seconds.
    ///
    /// Only Running sessions accumulate time. Returns `true` on the one
    /// tick that reaches (or passes) the target; the phase flips to
    /// Completed and every later call returns `false`.
    pub fn tick(&mut self, secs: u32) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        if self.target_secs > 0 && self.elapsed_secs >= self.target_secs {
            self.phase = SessionPhase::Completed;
            return true;
        }
        false
    }

    /// Abandon or acknowledge the session; back to Idle with zero elapsed.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.elapsed_secs = 0;
        self.target_secs = 0;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn target_secs(&self) -> u32 {
        self.target_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.target_secs.saturating_sub(self.elapsed_secs)
    }

    /// Completion fraction in [0, 1]. Zero-target timers report 0.
    pub fn progress(&self) -> f32 {
        if self.target_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f32 / self.target_secs as f32).min(1.0)
    }
}

/// Format a second count as `M:SS` for the session HUD.
pub fn format_clock(total_secs: u32) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}
