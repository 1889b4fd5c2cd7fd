//! Integration tests for the session lifecycle rules.
//!
//! Exercises: catalogue selection -> timer run -> completion -> progression
//! update, the way the client store drives them end to end.
//!
//! All tests are pure logic, no engine and no storage.

use mindspace_logic::catalogue::{self, SelectionError};
use mindspace_logic::mood::{clamp_mood, mood_label};
use mindspace_logic::progress::{experience, level_for_minutes, weekly_progress};
use mindspace_logic::session::{SessionPhase, SessionTimer};

// ── Helpers ────────────────────────────────────────────────────────────

/// Drive a timer to completion one second at a time, counting fire events.
fn run_to_end(timer: &mut SessionTimer, secs: u32) -> u32 {
    let mut completions = 0;
    for _ in 0..secs {
        if timer.tick(1) {
            completions += 1;
        }
    }
    completions
}

// ── Selection through completion ───────────────────────────────────────

#[test]
fn full_session_from_catalogue_to_completion() {
    let env = catalogue::validate_selection("ocean-depths", 10).unwrap();
    assert_eq!(env.name, "Ocean Depths");

    let mut timer = SessionTimer::new();
    timer.start(env.shortest_duration() * 60);
    assert_eq!(timer.phase(), SessionPhase::Running);

    let completions = run_to_end(&mut timer, 5 * 60);
    assert_eq!(completions, 1);
    assert_eq!(timer.phase(), SessionPhase::Completed);
}

#[test]
fn ten_minute_session_boundary() {
    let mut timer = SessionTimer::new();
    timer.start(600);

    assert_eq!(run_to_end(&mut timer, 599), 0);
    assert_eq!(timer.phase(), SessionPhase::Running);
    assert_eq!(timer.remaining_secs(), 1);

    assert_eq!(run_to_end(&mut timer, 1), 1);
    assert_eq!(timer.phase(), SessionPhase::Completed);
}

#[test]
fn pause_resume_preserves_exact_count() {
    let mut timer = SessionTimer::new();
    timer.start(120);

    run_to_end(&mut timer, 40);
    timer.pause();
    run_to_end(&mut timer, 500); // wall time passing while paused
    timer.resume();
    let completions = run_to_end(&mut timer, 80);

    assert_eq!(completions, 1);
    assert_eq!(timer.elapsed_secs(), 120);
}

#[test]
fn invalid_selection_is_rejected_before_any_timer_exists() {
    assert_eq!(
        catalogue::validate_selection("ocean-depths", 7),
        Err(SelectionError::DurationNotOffered)
    );
    assert_eq!(
        catalogue::validate_selection("missing", 10),
        Err(SelectionError::UnknownEnvironment)
    );
}

// ── Progression after completion ───────────────────────────────────────

#[test]
fn completing_sessions_levels_up_at_two_hour_marks() {
    let mut total_minutes = 110;
    assert_eq!(level_for_minutes(total_minutes), 1);

    // One 10-minute session crosses the boundary.
    total_minutes += 10;
    assert_eq!(level_for_minutes(total_minutes), 2);
    assert_eq!(experience(total_minutes).current, 0);
}

#[test]
fn demo_account_stats_are_consistent() {
    // The demo profile's 487 lifetime minutes derive level 5. The seed
    // data stores level 3; the derived level takes over on the first
    // recorded session.
    assert_eq!(level_for_minutes(487), 5);
    let xp = experience(487);
    assert_eq!(xp.current, 7);
    assert_eq!(xp.required, 120);
}

#[test]
fn weekly_goal_and_mood_summary_for_dashboard() {
    assert!((weekly_progress(4, 5) - 80.0).abs() < 0.001);
    assert_eq!(mood_label(clamp_mood(8)), "Good");
    assert_eq!(mood_label(clamp_mood(42)), "Excellent");
}
