//! Pure meditation domain rules for MindSpace.
//!
//! This crate contains every rule that is independent of the scene engine,
//! storage, or any runtime. Functions take plain data and return results,
//! making them unit-testable and portable between the desktop viewer, the
//! headless simtest harness, and any future host.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalogue`] | The six meditation environments, categories, daily insights |
//! | [`guidance`] | Per-environment voice-coach scripts with a universal fallback |
//! | [`mood`] | 1-10 mood scale labels, emoji, and accent colors |
//! | [`progress`] | Level/experience math, streaks, weekly goals, session goals |
//! | [`session`] | The session timer state machine (Idle/Running/Paused/Completed) |

pub mod catalogue;
pub mod guidance;
pub mod mood;
pub mod progress;
pub mod session;
