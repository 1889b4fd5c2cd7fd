//! MindSpace Headless Session Harness
//!
//! Validates catalogue data, scene generation, session timing, and the
//! account layer without opening a window. Runs entirely in-process with
//! no backend; transport failures are expected and exercised.
//!
//! Usage:
//!   cargo run -p mindspace-simtest
//!   cargo run -p mindspace-simtest -- --verbose

use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use mindspace_client::api::{ApiService, PremiumStatus, UserSession};
use mindspace_client::auth::{AuthError, AuthState, AuthStore};
use mindspace_client::routes::{resolve, Resolution, Route};
use mindspace_client::storage::{MemorySessionStore, STORAGE_KEY};
use mindspace_client::user::demo_user;
use mindspace_core::capability::{Capabilities, SimulatedHost};
use mindspace_core::components::{Bob, ParticleField, Placement, Prop, PropKind, Spin, WaveSurface};
use mindspace_core::engine::{EngineEvent, SessionConfig, SessionEngine};
use mindspace_core::generation::{build_scene, builder_for, clear_scene};
use mindspace_core::immersive::{ImmersiveController, ImmersiveMode};
use mindspace_core::media::{MediaError, SimulatedMedia};
use mindspace_core::systems::{
    bob_system, spin_system, wave_system, BiometricSample, SessionMetrics, TelemetrySimulator,
};
use mindspace_logic::catalogue::{self, Category, SelectionError};
use mindspace_logic::guidance;
use mindspace_logic::session::{format_clock, SessionPhase, SessionTimer};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== MindSpace Session Harness ===\n");

    let mut results = Vec::new();

    // 1. Environment catalogue validation
    results.extend(validate_catalogue(verbose));

    // 2. Scene generation census
    results.extend(validate_scenes(verbose));

    // 3. Animation systems
    results.extend(validate_animation(verbose));

    // 4. Session timing
    results.extend(validate_session_timing(verbose));

    // 5. Telemetry & metrics
    results.extend(validate_telemetry(verbose));

    // 6. Capabilities & immersive modes
    results.extend(validate_immersive(verbose));

    // 7. Full session run
    results.extend(validate_engine_run(verbose));

    // 8. Accounts & persistence
    results.extend(validate_accounts(verbose));

    // 9. API mock fallback
    results.extend(validate_api_fallback(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Environment Catalogue ────────────────────────────────────────────

fn validate_catalogue(verbose: bool) -> Vec<TestResult> {
    println!("--- Environment Catalogue ---");
    let mut results = Vec::new();

    // Six environments with unique ids
    let mut ids: Vec<&str> = catalogue::ENVIRONMENTS.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    results.push(TestResult {
        name: "catalogue_unique_ids".into(),
        passed: catalogue::ENVIRONMENTS.len() == 6 && ids.len() == 6,
        detail: format!(
            "{} environments, {} unique ids",
            catalogue::ENVIRONMENTS.len(),
            ids.len()
        ),
    });

    // Duration lists non-empty and ascending
    let bad_durations: Vec<&str> = catalogue::ENVIRONMENTS
        .iter()
        .filter(|e| e.durations.is_empty() || e.durations.windows(2).any(|w| w[0] >= w[1]))
        .map(|e| e.id)
        .collect();
    results.push(TestResult {
        name: "catalogue_durations_ascending".into(),
        passed: bad_durations.is_empty(),
        detail: if bad_durations.is_empty() {
            "every duration list is non-empty and ascending".into()
        } else {
            format!("bad duration lists: {}", bad_durations.join(", "))
        },
    });

    // Premium tier split
    let premium: Vec<&str> = catalogue::ENVIRONMENTS
        .iter()
        .filter(|e| e.premium)
        .map(|e| e.id)
        .collect();
    results.push(TestResult {
        name: "catalogue_premium_split".into(),
        passed: premium == ["crystal-cave", "space-nebula", "aurora-peaks"],
        detail: format!("premium environments: {}", premium.join(", ")),
    });

    // Category counts behind the filter chips
    let counts = [
        catalogue::category_count(Category::Nature),
        catalogue::category_count(Category::Space),
        catalogue::category_count(Category::Abstract),
        catalogue::category_count(Category::Urban),
    ];
    results.push(TestResult {
        name: "catalogue_category_counts".into(),
        passed: counts == [4, 1, 1, 0],
        detail: format!(
            "nature={} space={} abstract={} urban={}",
            counts[0], counts[1], counts[2], counts[3]
        ),
    });

    // Selection guard
    let valid = catalogue::validate_selection("forest-sanctuary", 10).is_ok();
    let bad_duration = matches!(
        catalogue::validate_selection("forest-sanctuary", 7),
        Err(SelectionError::DurationNotOffered)
    );
    let unknown_id = matches!(
        catalogue::validate_selection("volcano-core", 10),
        Err(SelectionError::UnknownEnvironment)
    );
    results.push(TestResult {
        name: "catalogue_selection_guard".into(),
        passed: valid && bad_duration && unknown_id,
        detail: format!(
            "valid={} bad_duration={} unknown_id={}",
            valid, bad_duration, unknown_id
        ),
    });

    // The catalogue serializes with the wire shape the pages expect
    let exported = serde_json::to_value(catalogue::ENVIRONMENTS).unwrap_or_default();
    let first = &exported[0];
    results.push(TestResult {
        name: "catalogue_json_shape".into(),
        passed: first["id"] == "forest-sanctuary"
            && first["category"] == "nature"
            && first["durations"][0] == 5
            && first["premium"] == false,
        detail: format!("first entry exports as {}", first["id"]),
    });

    // Daily insight rotation
    results.push(TestResult {
        name: "catalogue_daily_insight_rotation".into(),
        passed: catalogue::daily_insight(0) == catalogue::DAILY_INSIGHTS[0]
            && catalogue::daily_insight(7) == catalogue::DAILY_INSIGHTS[0]
            && catalogue::daily_insight(9) == catalogue::DAILY_INSIGHTS[2],
        detail: format!(
            "{} insights rotate by day ordinal",
            catalogue::DAILY_INSIGHTS.len()
        ),
    });

    // Every environment resolves to a non-empty guidance script
    let missing_scripts: Vec<&str> = catalogue::ENVIRONMENTS
        .iter()
        .filter(|e| guidance::guidance_for(e.id).is_empty())
        .map(|e| e.id)
        .collect();
    results.push(TestResult {
        name: "guidance_scripts_nonempty".into(),
        passed: missing_scripts.is_empty() && !guidance::guidance_for("volcano-core").is_empty(),
        detail: if missing_scripts.is_empty() {
            "every id resolves to a script, unknown ids included".into()
        } else {
            format!("environments without a script: {}", missing_scripts.join(", "))
        },
    });

    if verbose {
        println!("  Catalogue by category:");
        for category in Category::all() {
            let names: Vec<&str> = catalogue::by_category(*category).map(|e| e.name).collect();
            println!("    {:8}: {}", category.label(), names.join(", "));
        }
    }

    results
}

// ── 2. Scene Generation ─────────────────────────────────────────────────

fn validate_scenes(verbose: bool) -> Vec<TestResult> {
    println!("--- Scene Generation ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(11);

    // Every catalogue id builds a non-empty scene, and the world holds
    // exactly the entities the scene tracks
    let mut built = Vec::new();
    let mut consistent = true;
    for env in catalogue::ENVIRONMENTS {
        let mut world = World::new();
        let scene = build_scene(&mut world, env.id, &mut rng);
        consistent &= scene.prop_count() > 0 && world.len() as usize == scene.prop_count();
        built.push((env.id, scene.prop_count(), scene.is_fallback));
    }
    results.push(TestResult {
        name: "scene_every_environment_builds".into(),
        passed: consistent,
        detail: "every catalogue id builds a non-empty, fully tracked scene".into(),
    });

    // Registry: four bespoke builders, two catalogue ids share the default
    let bespoke: Vec<&str> = built
        .iter()
        .filter(|(_, _, fallback)| !fallback)
        .map(|(id, _, _)| *id)
        .collect();
    let fallback: Vec<&str> = built
        .iter()
        .filter(|(_, _, fallback)| *fallback)
        .map(|(id, _, _)| *id)
        .collect();
    results.push(TestResult {
        name: "scene_builder_registry".into(),
        passed: bespoke == ["forest-sanctuary", "crystal-cave", "ocean-depths", "space-nebula"]
            && fallback == ["zen-garden", "aurora-peaks"]
            && builder_for("forest-sanctuary").is_some()
            && builder_for("zen-garden").is_none(),
        detail: format!(
            "bespoke: {} | default scene: {}",
            bespoke.join(", "),
            fallback.join(", ")
        ),
    });

    // Unknown ids fall back instead of failing
    let mut unknown_world = World::new();
    let unknown_scene = build_scene(&mut unknown_world, "volcano-core", &mut rng);
    results.push(TestResult {
        name: "scene_unknown_id_fallback".into(),
        passed: unknown_scene.is_fallback
            && unknown_scene.prop_count() == 1
            && unknown_scene.environment_id == "volcano-core",
        detail: format!(
            "volcano-core -> fallback scene with {} prop(s)",
            unknown_scene.prop_count()
        ),
    });

    // Forest census: 20 trees in two parts, 50 sound orbs, one field
    let mut forest_world = World::new();
    let mut forest_scene = build_scene(&mut forest_world, "forest-sanctuary", &mut rng);
    let trunks = count_kind(&forest_world, PropKind::TreeTrunk);
    let canopies = count_kind(&forest_world, PropKind::TreeCanopy);
    let orbs = count_kind(&forest_world, PropKind::SoundOrb);
    let fields = forest_world.query::<&ParticleField>().iter().count();
    results.push(TestResult {
        name: "scene_forest_census".into(),
        passed: trunks == 20
            && canopies == 20
            && orbs == 50
            && fields == 1
            && forest_scene.prop_count() == 91,
        detail: format!(
            "trunks={} canopies={} orbs={} fields={} total={}",
            trunks,
            canopies,
            orbs,
            fields,
            forest_scene.prop_count()
        ),
    });

    // Ocean carries one 33x33 wave surface
    let mut ocean_world = World::new();
    build_scene(&mut ocean_world, "ocean-depths", &mut rng);
    let wave_counts: Vec<usize> = ocean_world
        .query::<&WaveSurface>()
        .iter()
        .map(|(_, wave)| wave.vertex_count())
        .collect();
    results.push(TestResult {
        name: "scene_ocean_wave_grid".into(),
        passed: wave_counts == [33 * 33],
        detail: format!(
            "{} wave surface(s), {} vertices",
            wave_counts.len(),
            wave_counts.first().copied().unwrap_or(0)
        ),
    });

    // Star field size and scatter bounds
    let mut nebula_world = World::new();
    build_scene(&mut nebula_world, "space-nebula", &mut rng);
    let mut star_points = 0usize;
    let mut in_bounds = true;
    for (_, field) in nebula_world.query::<&ParticleField>().iter() {
        star_points += field.points.len();
        in_bounds &= field.points.iter().all(|p| p.max_abs() <= 1000.0);
    }
    results.push(TestResult {
        name: "scene_nebula_star_bounds".into(),
        passed: star_points == 10_000 && in_bounds,
        detail: format!("{} star points, all within +/-1000", star_points),
    });

    // Teardown drains the scene and a second clear is a no-op
    clear_scene(&mut forest_world, &mut forest_scene);
    let emptied = forest_world.len() == 0 && forest_scene.prop_count() == 0;
    clear_scene(&mut forest_world, &mut forest_scene);
    results.push(TestResult {
        name: "scene_clear_is_idempotent".into(),
        passed: emptied && forest_world.len() == 0,
        detail: "clear empties the world; a second clear despawns nothing".into(),
    });

    if verbose {
        println!("  Prop counts:");
        for (id, count, fallback) in &built {
            let suffix = if *fallback { " (default scene)" } else { "" };
            println!("    {:16} {:5} props{}", id, count, suffix);
        }
    }

    results
}

fn count_kind(world: &World, kind: PropKind) -> usize {
    world
        .query::<&Prop>()
        .iter()
        .filter(|(_, prop)| prop.kind == kind)
        .count()
}

// ── 3. Animation Systems ────────────────────────────────────────────────

fn validate_animation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Animation Systems ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(23);

    // Ocean has all three animated component kinds: spinning, bobbing
    // bubbles over a wave surface
    let mut world = World::new();
    let scene = build_scene(&mut world, "ocean-depths", &mut rng);

    // Spin advances by rate * dt, wrapped to [0, TAU)
    let before: Vec<(f32, f32)> = world
        .query::<(&Placement, &Spin)>()
        .iter()
        .map(|(_, (placement, spin))| (placement.rotation_y, spin.rate))
        .collect();
    spin_system(&mut world, 0.5);
    let after: Vec<f32> = world
        .query::<(&Placement, &Spin)>()
        .iter()
        .map(|(_, (placement, _))| placement.rotation_y)
        .collect();
    let mut spin_ok = !before.is_empty() && before.len() == after.len();
    for ((was, rate), now) in before.iter().zip(after.iter()) {
        let expected = (was + rate * 0.5).rem_euclid(TAU);
        spin_ok &= (now - expected).abs() < 1e-4;
    }
    results.push(TestResult {
        name: "animation_spin_advances".into(),
        passed: spin_ok,
        detail: format!("{} spinning props advanced by rate * dt", before.len()),
    });

    // Bob holds each floater inside base_y +/- amplitude at the closed form
    let clock = 3.7_f64;
    bob_system(&mut world, clock);
    let t = clock as f32;
    let mut bobbers = 0;
    let mut bob_ok = true;
    for (_, (placement, bob)) in world.query::<(&Placement, &Bob)>().iter() {
        bobbers += 1;
        let expected = bob.base_y + (t * bob.rate + bob.phase).sin() * bob.amplitude;
        bob_ok &= (placement.position.y - expected).abs() < 1e-4;
        bob_ok &= (placement.position.y - bob.base_y).abs() <= bob.amplitude + 1e-4;
    }
    results.push(TestResult {
        name: "animation_bob_around_base".into(),
        passed: bobbers == 50 && bob_ok,
        detail: format!("{} floaters at the expected heights for t={}", bobbers, clock),
    });

    // Wave heights match the closed form and never exceed the amplitude
    wave_system(&mut world, clock);
    let mut wave_ok = true;
    let mut vertices = 0;
    for (_, wave) in world.query::<&WaveSurface>().iter() {
        vertices += wave.vertex_count();
        for (index, height) in wave.heights.iter().enumerate() {
            let (x, z) = wave.vertex_xz(index);
            let expected = (x * 0.1 + t).sin() * (z * 0.1 + t).cos() * wave.amplitude;
            wave_ok &= height.is_finite()
                && height.abs() <= wave.amplitude + 1e-4
                && (height - expected).abs() < 1e-3;
        }
    }
    results.push(TestResult {
        name: "animation_wave_closed_form".into(),
        passed: vertices == 33 * 33 && wave_ok,
        detail: format!("{} wave vertices match sin/cos displacement", vertices),
    });

    // A long run never spawns, despawns, or reallocates anything
    let entity_count = world.len();
    for frame in 0..1000 {
        let frame_clock = frame as f64 / 64.0;
        spin_system(&mut world, 1.0 / 64.0);
        bob_system(&mut world, frame_clock);
        wave_system(&mut world, frame_clock);
    }
    let count_stable =
        world.len() == entity_count && world.len() as usize == scene.prop_count();
    let yaw_wrapped = world
        .query::<(&Placement, &Spin)>()
        .iter()
        .all(|(_, (placement, _))| (0.0..TAU).contains(&placement.rotation_y));
    let grid_stable = world
        .query::<&WaveSurface>()
        .iter()
        .all(|(_, wave)| wave.vertex_count() == 33 * 33 && wave.heights.iter().all(|h| h.is_finite()));
    results.push(TestResult {
        name: "animation_long_run_stable".into(),
        passed: count_stable && yaw_wrapped && grid_stable,
        detail: format!(
            "{} entities and {} wave vertices intact after 1000 frames",
            world.len(),
            33 * 33
        ),
    });

    results
}

// ── 4. Session Timing ───────────────────────────────────────────────────

fn validate_session_timing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Session Timing ---");
    let mut results = Vec::new();

    // A 600s session completes exactly once, on the 600th counted second
    let mut timer = SessionTimer::new();
    let idle_ignored = !timer.tick(1) && timer.elapsed_secs() == 0;
    timer.start(600);
    let mut completions = 0;
    for _ in 0..599 {
        if timer.tick(1) {
            completions += 1;
        }
    }
    let running_at_599 =
        timer.phase() == SessionPhase::Running && timer.remaining_secs() == 1 && completions == 0;
    if timer.tick(1) {
        completions += 1;
    }
    let completed = timer.phase() == SessionPhase::Completed;
    let mut late = 0;
    for _ in 0..25 {
        if timer.tick(1) {
            late += 1;
        }
    }
    results.push(TestResult {
        name: "timer_completes_exactly_once".into(),
        passed: idle_ignored
            && running_at_599
            && completions == 1
            && completed
            && late == 0
            && timer.elapsed_secs() == 600,
        detail: format!(
            "{} completion at 600s, {} re-fires, elapsed held at {}",
            completions,
            late,
            timer.elapsed_secs()
        ),
    });

    // Paused seconds never count toward the target
    let mut timer = SessionTimer::new();
    timer.start(120);
    for _ in 0..30 {
        timer.tick(1);
    }
    timer.pause();
    let held = !timer.tick(1) && timer.elapsed_secs() == 30 && timer.phase() == SessionPhase::Paused;
    timer.resume();
    let mut completions = 0;
    for _ in 0..90 {
        if timer.tick(1) {
            completions += 1;
        }
    }
    results.push(TestResult {
        name: "timer_pause_never_double_counts".into(),
        passed: held && completions == 1 && timer.elapsed_secs() == 120,
        detail: "30s + pause + 90s completes at exactly 120 counted seconds".into(),
    });

    // Toggle flips Running <-> Paused and nothing else
    let mut timer = SessionTimer::new();
    timer.toggle();
    let idle_held = timer.phase() == SessionPhase::Idle;
    timer.start(60);
    timer.toggle();
    let paused = timer.phase() == SessionPhase::Paused;
    timer.toggle();
    let resumed = timer.phase() == SessionPhase::Running;
    timer.tick(60);
    timer.toggle();
    let completed_held = timer.phase() == SessionPhase::Completed;
    results.push(TestResult {
        name: "timer_toggle_mapping".into(),
        passed: idle_held && paused && resumed && completed_held,
        detail: "toggle only moves between Running and Paused".into(),
    });

    // Start is ignored outside Idle; reset re-arms the machine
    let mut timer = SessionTimer::new();
    timer.start(600);
    timer.tick(100);
    timer.start(300);
    let start_guarded = timer.target_secs() == 600 && timer.elapsed_secs() == 100;
    timer.reset();
    let reset_ok =
        timer.phase() == SessionPhase::Idle && timer.elapsed_secs() == 0 && timer.target_secs() == 0;
    timer.start(10);
    results.push(TestResult {
        name: "timer_start_guard_and_reset".into(),
        passed: start_guarded && reset_ok && timer.phase() == SessionPhase::Running,
        detail: "double start ignored; reset returns to a startable Idle".into(),
    });

    // Progress, remaining time, and the HUD clock format
    let mut timer = SessionTimer::new();
    timer.start(600);
    for _ in 0..150 {
        timer.tick(1);
    }
    let quarter = timer.remaining_secs() == 450 && (timer.progress() - 0.25).abs() < 1e-6;
    let clock_ok = format_clock(0) == "0:00"
        && format_clock(59) == "0:59"
        && format_clock(600) == "10:00"
        && format_clock(754) == "12:34";
    results.push(TestResult {
        name: "timer_progress_and_clock".into(),
        passed: quarter && clock_ok,
        detail: format!(
            "150/600s -> progress {:.2}, {} remaining",
            timer.progress(),
            format_clock(timer.remaining_secs())
        ),
    });

    // The engine countdown lands on the same frame for every frame rate
    for dt in [1.0f32, 0.5, 0.25, 0.125] {
        let mut rng = StdRng::seed_from_u64(31);
        let mut media = SimulatedMedia::default();
        let mut engine = SessionEngine::new(
            SessionConfig::new("zen-garden", 20),
            Capabilities::default(),
            &mut rng,
        );
        engine.begin(&mut media, &mut rng);

        let expected_frame = (20.0 / dt) as usize;
        let mut completions = 0;
        let mut completed_at = 0usize;
        for frame in 1..=expected_frame + 200 {
            engine.update(dt, &mut rng);
            for event in engine.drain_events() {
                if matches!(event, EngineEvent::Completed) {
                    completions += 1;
                    completed_at = frame;
                }
            }
        }
        results.push(TestResult {
            name: format!("engine_countdown_dt_{}", dt),
            passed: completions == 1 && completed_at == expected_frame,
            detail: format!(
                "dt={}s -> completed once at update {} (expected {})",
                dt, completed_at, expected_frame
            ),
        });
    }

    results
}

// ── 5. Telemetry & Metrics ──────────────────────────────────────────────

fn validate_telemetry(verbose: bool) -> Vec<TestResult> {
    println!("--- Telemetry & Metrics ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(41);

    // Samples stay inside their documented ranges
    let mut telemetry = TelemetrySimulator::new();
    telemetry.start();
    let mut clock = 0.0f64;
    let mut sampled = 0;
    let mut all_in_range = true;
    let mut min_heart_rate = f32::MAX;
    let mut max_heart_rate = f32::MIN;
    for _ in 0..2_000 {
        clock += 1.0;
        if let Some(sample) = telemetry.poll(1.0, clock, &mut rng) {
            sampled += 1;
            all_in_range &= sample.in_range();
            min_heart_rate = min_heart_rate.min(sample.heart_rate);
            max_heart_rate = max_heart_rate.max(sample.heart_rate);
        }
    }
    results.push(TestResult {
        name: "telemetry_ranges".into(),
        passed: sampled == 2_000 && all_in_range,
        detail: format!("{} samples, all within documented ranges", sampled),
    });

    // One sample per simulated second regardless of frame rate
    let mut telemetry = TelemetrySimulator::new();
    telemetry.start();
    let mut clock = 0.0f64;
    let mut samples = 0;
    for _ in 0..240 {
        clock += 0.25;
        if telemetry.poll(0.25, clock, &mut rng).is_some() {
            samples += 1;
        }
    }
    results.push(TestResult {
        name: "telemetry_one_hz_cadence".into(),
        passed: samples == 60,
        detail: format!("240 updates at 0.25s -> {} samples (expected 60)", samples),
    });

    // A stalled caller catches up one sample per poll, never a flood
    let mut stalled = TelemetrySimulator::new();
    stalled.start();
    let first = stalled.poll(10.0, 10.0, &mut rng).is_some();
    let catch_up = stalled.poll(0.0, 10.0, &mut rng).is_some();
    results.push(TestResult {
        name: "telemetry_stall_catches_up".into(),
        passed: first && catch_up,
        detail: "a 10s stall emits one sample per poll while catching up".into(),
    });

    // Stop is idempotent and a restart resumes sampling
    stalled.stop();
    stalled.stop();
    let silent = !stalled.is_running() && stalled.poll(5.0, 15.0, &mut rng).is_none();
    stalled.start();
    let resumed = stalled.is_running() && stalled.poll(1.0, 16.0, &mut rng).is_some();
    results.push(TestResult {
        name: "telemetry_stop_idempotent".into(),
        passed: silent && resumed,
        detail: "double stop silences polling; start resumes it".into(),
    });

    // The focus/mindfulness walks step at most 5.0/2.5 and stay clamped
    let mut metrics = SessionMetrics::default();
    let mut walk_ok = true;
    let mut previous_focus = metrics.focus;
    let mut previous_mindfulness = metrics.mindfulness;
    for _ in 0..10_000 {
        metrics.drift(&mut rng);
        walk_ok &= (0.0..=100.0).contains(&metrics.focus)
            && (0.0..=100.0).contains(&metrics.mindfulness)
            && (metrics.focus - previous_focus).abs() <= 5.0
            && (metrics.mindfulness - previous_mindfulness).abs() <= 2.5;
        previous_focus = metrics.focus;
        previous_mindfulness = metrics.mindfulness;
    }
    let physiology_untouched = metrics.heart_rate == 72.0
        && metrics.stress == 45.0
        && metrics.breathing_rate == 16.0;
    results.push(TestResult {
        name: "metrics_walk_bounded".into(),
        passed: walk_ok && physiology_untouched,
        detail: format!(
            "10,000 drifts stayed in [0, 100]; focus={:.1} mindfulness={:.1}",
            metrics.focus, metrics.mindfulness
        ),
    });

    // Absorb copies exactly the physiological fields
    let sample = BiometricSample::draw(&mut rng, 42.0);
    let mut metrics = SessionMetrics::default();
    metrics.absorb(&sample);
    results.push(TestResult {
        name: "metrics_absorb_sample".into(),
        passed: metrics.heart_rate == sample.heart_rate
            && metrics.stress == sample.stress
            && metrics.breathing_rate == sample.breathing_rate
            && metrics.focus == 85.0
            && metrics.mindfulness == 78.0,
        detail: "absorb copies heart/stress/breathing and leaves the walks alone".into(),
    });

    if verbose {
        println!(
            "  Heart-rate span over {} samples: {:.1}..{:.1} bpm",
            sampled, min_heart_rate, max_heart_rate
        );
    }

    results
}

// ── 6. Capabilities & Immersive Modes ───────────────────────────────────

fn validate_immersive(_verbose: bool) -> Vec<TestResult> {
    println!("--- Capabilities & Immersive Modes ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(53);

    // The probe copies every flag for all 16 host combinations
    let mut probe_ok = true;
    for bits in 0..16u32 {
        let host = SimulatedHost {
            immersive_session: bits & 1 != 0,
            camera: bits & 2 != 0,
            microphone: bits & 4 != 0,
            motion_sensor: bits & 8 != 0,
        };
        let caps = Capabilities::probe(&host);
        probe_ok &= caps.immersive_session == host.immersive_session
            && caps.camera == host.camera
            && caps.microphone == host.microphone
            && caps.motion_sensor == host.motion_sensor
            && caps.vr() == host.immersive_session
            && caps.ar() == host.camera;
    }
    results.push(TestResult {
        name: "capability_probe_all_hosts".into(),
        passed: probe_ok,
        detail: "all 16 host flag combinations probe and derive correctly".into(),
    });

    let full = Capabilities::probe(&SimulatedHost::full());

    // VR never fails; hosts without immersive sessions get the simulation
    let mut controller = ImmersiveController::new();
    let simulated = controller.enter_vr(&Capabilities::default());
    let real = controller.enter_vr(&full);
    results.push(TestResult {
        name: "immersive_vr_never_fails".into(),
        passed: matches!(simulated, ImmersiveMode::Vr { simulated: true })
            && matches!(real, ImmersiveMode::Vr { simulated: false })
            && simulated.is_immersive(),
        detail: format!(
            "bare host -> {}, full host -> {}",
            simulated.label(),
            real.label()
        ),
    });

    // AR requires the camera capability
    let mut controller = ImmersiveController::new();
    let mut media = SimulatedMedia::default();
    let missing = controller.enter_ar(&Capabilities::default(), &mut media, &mut rng);
    results.push(TestResult {
        name: "immersive_ar_needs_camera".into(),
        passed: missing == Err(MediaError::Unavailable)
            && controller.mode() == ImmersiveMode::Standard,
        detail: "a camera-less host cannot enter AR".into(),
    });

    // A denied camera keeps whatever mode was active
    let mut controller = ImmersiveController::new();
    controller.enter_vr(&full);
    let mut denied = SimulatedMedia::denied();
    let rejection = controller.enter_ar(&full, &mut denied, &mut rng);
    results.push(TestResult {
        name: "immersive_ar_denied_keeps_mode".into(),
        passed: rejection == Err(MediaError::PermissionDenied)
            && matches!(controller.mode(), ImmersiveMode::Vr { simulated: false }),
        detail: "denied camera permission leaves the session in VR".into(),
    });

    // AR holds the camera feed until exit; exit is idempotent
    let mut media = SimulatedMedia::default();
    let entered = controller.enter_ar(&full, &mut media, &mut rng).is_ok();
    let holding = controller.has_camera_feed();
    controller.exit();
    controller.exit();
    results.push(TestResult {
        name: "immersive_exit_idempotent".into(),
        passed: entered
            && holding
            && controller.mode() == ImmersiveMode::Standard
            && !controller.has_camera_feed(),
        detail: "AR held a camera feed; double exit released it cleanly".into(),
    });

    results
}

// ── 7. Full Session Run ─────────────────────────────────────────────────

fn validate_engine_run(verbose: bool) -> Vec<TestResult> {
    println!("--- Full Session Run ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(61);
    let mut media = SimulatedMedia::default();
    let caps = Capabilities::probe(&SimulatedHost::full());

    // A 2-minute forest session at 4 updates per second, end to end
    let mut engine = SessionEngine::new(
        SessionConfig::from_minutes("forest-sanctuary", 2),
        caps,
        &mut rng,
    );
    engine.begin(&mut media, &mut rng);

    let dt = 0.25f32;
    let expected_frame = (120.0 / dt) as usize;
    let mut biometrics = 0;
    let mut samples_ok = true;
    let mut guidance_lines: Vec<&'static str> = Vec::new();
    let mut completions = 0;
    let mut completed_at = 0usize;
    let mut events_after_completion = 0;
    for frame in 1..=expected_frame + 400 {
        engine.update(dt, &mut rng);
        for event in engine.drain_events() {
            if completions > 0 {
                events_after_completion += 1;
            }
            match event {
                EngineEvent::Biometric(sample) => {
                    biometrics += 1;
                    samples_ok &= sample.in_range();
                }
                EngineEvent::Guidance(line) => guidance_lines.push(line),
                EngineEvent::Completed => {
                    completions += 1;
                    completed_at = frame;
                }
            }
        }
    }

    results.push(TestResult {
        name: "run_completes_once_on_time".into(),
        passed: completions == 1 && completed_at == expected_frame && engine.elapsed_secs() == 120,
        detail: format!(
            "completed once at update {} (expected {})",
            completed_at, expected_frame
        ),
    });

    results.push(TestResult {
        name: "run_one_sample_per_second".into(),
        passed: biometrics == 120 && samples_ok,
        detail: format!("{} biometric samples over a 120s session", biometrics),
    });

    let script = guidance::guidance_for("forest-sanctuary");
    let follows_script = guidance_lines
        .iter()
        .enumerate()
        .all(|(i, line)| *line == script[i % script.len()]);
    results.push(TestResult {
        name: "run_guidance_follows_script".into(),
        passed: guidance_lines.len() >= 2 && follows_script,
        detail: format!("{} guidance lines, in script order", guidance_lines.len()),
    });

    results.push(TestResult {
        name: "run_quiet_after_completion".into(),
        passed: events_after_completion == 0
            && engine.phase() == SessionPhase::Completed
            && engine.prop_count() == 91
            && !engine.is_coach_listening(),
        detail: "nothing emits after completion and the scene stays up".into(),
    });

    if verbose {
        let metrics = engine.metrics();
        println!(
            "  Metrics at completion: heart {:.1} bpm, stress {:.1}, breathing {:.1}/min, focus {:.1}, mindfulness {:.1}",
            metrics.heart_rate, metrics.stress, metrics.breathing_rate, metrics.focus, metrics.mindfulness
        );
    }

    // Pause holds the countdown while telemetry keeps sampling
    let mut engine = SessionEngine::new(SessionConfig::new("ocean-depths", 60), caps, &mut rng);
    engine.begin(&mut media, &mut rng);
    for _ in 0..10 {
        engine.update(1.0, &mut rng);
    }
    engine.drain_events();
    engine.pause();
    let mut paused_samples = 0;
    let mut paused_other = 0;
    for _ in 0..20 {
        engine.update(1.0, &mut rng);
        for event in engine.drain_events() {
            match event {
                EngineEvent::Biometric(_) => paused_samples += 1,
                _ => paused_other += 1,
            }
        }
    }
    let countdown_held = engine.elapsed_secs() == 10 && engine.phase() == SessionPhase::Paused;
    engine.resume();
    results.push(TestResult {
        name: "run_pause_telemetry_continues".into(),
        passed: countdown_held && paused_samples == 20 && paused_other == 0,
        detail: format!(
            "{} samples while paused, countdown held at {}s",
            paused_samples,
            engine.elapsed_secs()
        ),
    });

    // Shutdown despawns the scene and repeated calls stay quiet
    engine.shutdown();
    let torn_down = engine.world.len() == 0
        && engine.prop_count() == 0
        && engine.phase() == SessionPhase::Idle
        && engine.immersive_mode() == ImmersiveMode::Standard;
    engine.shutdown();
    engine.update(1.0, &mut rng);
    results.push(TestResult {
        name: "run_shutdown_idempotent".into(),
        passed: torn_down && engine.world.len() == 0 && engine.drain_events().is_empty(),
        detail: "shutdown cleared the world; repeated calls emit nothing".into(),
    });

    results
}

// ── 8. Accounts & Persistence ───────────────────────────────────────────

fn validate_accounts(_verbose: bool) -> Vec<TestResult> {
    println!("--- Accounts & Persistence ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(71);

    // The persisted record lives under the product's storage key
    results.push(TestResult {
        name: "storage_key_name".into(),
        passed: STORAGE_KEY == "mindspace-auth",
        detail: format!("session record persists under {:?}", STORAGE_KEY),
    });

    // Login resolves to the demo account and writes the record through
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let login = auth.login("maya@example.com", "password123");
    let demo_ok = auth
        .user()
        .map(|u| (u.id.as_str(), u.name.as_str(), u.meditation_stats.total_sessions))
        == Some(("1", "maya", 23));
    let persisted = auth.storage().record().map(|s| s.is_authenticated) == Some(true);
    results.push(TestResult {
        name: "auth_login_demo_account".into(),
        passed: login.is_ok() && auth.is_authenticated() && demo_ok && persisted,
        detail: "login resolves to the demo account and persists the session".into(),
    });

    // Empty credentials are rejected with nothing persisted
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let no_email = auth.login("", "secret");
    let no_password = auth.login("maya@example.com", "");
    results.push(TestResult {
        name: "auth_rejects_empty_credentials".into(),
        passed: no_email == Err(AuthError::InvalidCredentials)
            && no_password == Err(AuthError::InvalidCredentials)
            && !auth.is_authenticated()
            && auth.storage().record().is_none(),
        detail: "invalid credentials leave no session record behind".into(),
    });

    // Signup mints a fresh zero-history account
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let unnamed = auth.signup("kai@example.com", "pw", "  ", &mut rng);
    let signup = auth.signup("kai@example.com", "pw", "Kai", &mut rng);
    let fresh_ok = auth
        .user()
        .map(|u| {
            (
                u.id.len(),
                u.id != "1",
                u.meditation_stats.total_sessions,
                u.meditation_stats.current_level,
            )
        })
        == Some((9, true, 0, 1));
    results.push(TestResult {
        name: "auth_signup_fresh_account".into(),
        passed: unnamed == Err(AuthError::NameRequired) && signup.is_ok() && fresh_ok,
        detail: "signup mints a 9-char id with zero history at level 1".into(),
    });

    // Logging in again replaces the one session record
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let _ = auth.login("first@example.com", "pw");
    let _ = auth.login("second@example.com", "pw");
    let single = auth
        .storage()
        .record()
        .and_then(|s| s.user.as_ref())
        .map(|u| u.email.as_str())
        == Some("second@example.com");
    results.push(TestResult {
        name: "auth_single_session_record".into(),
        passed: single && auth.is_authenticated(),
        detail: "a second login replaces the persisted record".into(),
    });

    // A saved record signs the user back in on startup
    let seeded = MemorySessionStore::seeded(AuthState {
        user: Some(demo_user("back@example.com")),
        is_authenticated: true,
    });
    let rehydrated = AuthStore::new(seeded);
    results.push(TestResult {
        name: "auth_rehydrates_saved_session".into(),
        passed: rehydrated.is_authenticated()
            && rehydrated.user().map(|u| u.email.as_str()) == Some("back@example.com"),
        detail: "startup rehydration restores the saved session".into(),
    });

    // Completed sessions fold into the lifetime stats and recompute level
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let _ = auth.login("maya@example.com", "pw");
    auth.record_completed_session(10);
    let stats = auth.user().map(|u| {
        (
            u.meditation_stats.total_sessions,
            u.meditation_stats.total_minutes,
            u.meditation_stats.current_level,
        )
    });
    results.push(TestResult {
        name: "auth_records_completed_session".into(),
        passed: stats == Some((24, 497, 5)),
        detail: format!("23+1 sessions, 487+10 minutes -> {:?}", stats),
    });

    // Subscribers hear every committed change until they unsubscribe
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);
    let subscription = auth.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated));
    let _ = auth.login("maya@example.com", "pw");
    auth.logout();
    auth.unsubscribe(subscription);
    let _ = auth.login("maya@example.com", "pw");
    let notified = *heard.borrow() == [true, false];
    results.push(TestResult {
        name: "auth_subscribers_notified".into(),
        passed: notified,
        detail: format!("subscriber heard {:?}, then nothing after unsubscribe", heard.borrow()),
    });

    // Logout persists the signed-out state
    let mut auth = AuthStore::new(MemorySessionStore::new());
    let _ = auth.login("maya@example.com", "pw");
    auth.logout();
    results.push(TestResult {
        name: "auth_logout_persists_signed_out".into(),
        passed: !auth.is_authenticated()
            && auth.storage().record().map(|s| s.is_authenticated) == Some(false),
        detail: "logout writes the signed-out state back to storage".into(),
    });

    // The navigation guard: public, protected, unknown-session, and 404
    let guard_ok = resolve("/", false) == Resolution::Show(Route::Index)
        && resolve("/auth", false) == Resolution::Show(Route::Auth)
        && resolve("/dashboard", false) == Resolution::Redirect(Route::Auth)
        && resolve("/dashboard", true) == Resolution::Show(Route::Dashboard)
        && resolve("/environments/forest-sanctuary", true)
            == Resolution::Show(Route::EnvironmentSession("forest-sanctuary".into()))
        && resolve("/environments/volcano-core", true) == Resolution::Redirect(Route::Environments)
        && resolve("/nope", true) == Resolution::NotFound;
    results.push(TestResult {
        name: "routes_guard_matrix".into(),
        passed: guard_ok,
        detail: "public, protected, unknown-id, and 404 paths all resolve correctly".into(),
    });

    results
}

// ── 9. API Mock Fallback ────────────────────────────────────────────────

fn validate_api_fallback(verbose: bool) -> Vec<TestResult> {
    println!("--- API Mock Fallback ---");
    let mut results = Vec::new();

    let mut api = ApiService::offline();
    api.set_auth_token("demo-token");

    // The progress endpoint serves its canned payload, tagged as mock
    let progress = api.get_user_progress();
    results.push(TestResult {
        name: "api_progress_mock_tagged".into(),
        passed: progress.source.is_mock()
            && progress.message == "Progress retrieved successfully"
            && progress.data.total_sessions == 23
            && progress.data.total_minutes == 487
            && progress.data.streak_days == 7
            && progress.data.mood_trend.len() == 7
            && progress.data.achievements.len() == 2
            && progress.data.achievements[0].id == "first-session",
        detail: format!(
            "{} sessions, {} mood points, {} achievements from the mock table",
            progress.data.total_sessions,
            progress.data.mood_trend.len(),
            progress.data.achievements.len()
        ),
    });

    // The analytics endpoint serves its canned payload
    let analytics = api.get_analytics();
    results.push(TestResult {
        name: "api_analytics_mock_tagged".into(),
        passed: analytics.source.is_mock()
            && analytics.message == "Analytics retrieved successfully"
            && analytics.data.sessions_this_week == 5
            && analytics.data.daily_activity.len() == 7
            && analytics.data.environment_usage.len() == 3
            && analytics.data.environment_usage[0].environment_id == "forest-sanctuary",
        detail: format!(
            "{} sessions this week across {} recorded days",
            analytics.data.sessions_this_week,
            analytics.data.daily_activity.len()
        ),
    });

    // Endpoints without a canned payload fall back to typed defaults
    let premium = api.check_premium_status();
    results.push(TestResult {
        name: "api_unmapped_serves_default".into(),
        passed: premium.source.is_mock()
            && premium.message == "Mock response"
            && premium.data == PremiumStatus::default()
            && !premium.data.is_premium,
        detail: "unmapped endpoints serve the generic message and a default payload".into(),
    });

    // Completing a session offline still returns a usable tagged response
    let session = UserSession {
        id: "sess-101".into(),
        user_id: "1".into(),
        environment_id: "ocean-depths".into(),
        duration: 15,
        mood_before: 5,
        mood_after: 8,
        ..UserSession::default()
    };
    let completed = api.complete_session(&session);
    results.push(TestResult {
        name: "api_complete_session_offline".into(),
        passed: completed.source.is_mock()
            && completed.message == "Mock response"
            && completed.data == UserSession::default(),
        detail: "session completion degrades to a tagged default offline".into(),
    });

    // History decodes to an empty list rather than an error
    let history = api.get_session_history();
    results.push(TestResult {
        name: "api_history_empty_offline".into(),
        passed: history.source.is_mock() && history.data.is_empty(),
        detail: format!("{} sessions in offline history", history.data.len()),
    });

    if verbose {
        println!("  Mock achievements:");
        for achievement in &progress.data.achievements {
            println!("    {} - {}", achievement.title, achievement.description);
        }
    }

    results
}
