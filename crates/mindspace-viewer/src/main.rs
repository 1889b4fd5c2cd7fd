//! MindSpace Viewer - Bevy-based visualization of a meditation session

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use mindspace_core::capability::{Capabilities, EnvHost};
use mindspace_core::components::{
    ParticleField, Placement, Prop, Shape, Tint, Vec3 as SimVec3, WaveSurface,
};
use mindspace_core::engine::{EngineEvent, SessionConfig, SessionEngine};
use mindspace_core::immersive::ImmersiveMode;
use mindspace_core::media::{MediaError, SimulatedMedia};
use mindspace_logic::catalogue::{self, ENVIRONMENTS};
use mindspace_logic::session::{format_clock, SessionPhase};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "MindSpace - Meditation Session".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bevy::diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(bevy::diagnostic::LogDiagnosticsPlugin::default())
        .insert_resource(SessionWrapper::new())
        .insert_resource(CameraState::default())
        .insert_resource(GuidanceFeed::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                update_session,
                session_controls,
                camera_controls,
                render_props,
                render_particles,
                render_waves,
                update_text_ui,
            ),
        )
        .run();
}

#[derive(Resource)]
struct SessionWrapper {
    engine: SessionEngine,
    media: SimulatedMedia,
    rng: StdRng,
    env_index: usize,
    time_scale: f32,
}

impl SessionWrapper {
    fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        let capabilities = Capabilities::probe(&EnvHost);
        let env = &ENVIRONMENTS[0];
        let config = SessionConfig::from_minutes(env.id, env.shortest_duration());
        let engine = SessionEngine::new(config, capabilities, &mut rng);
        Self {
            engine,
            media: SimulatedMedia::default(),
            rng,
            env_index: 0,
            time_scale: 1.0, // Real-time by default (use +/- to adjust)
        }
    }

    fn begin(&mut self) {
        self.engine.begin(&mut self.media, &mut self.rng);
    }

    fn update(&mut self, delta_seconds: f32) {
        self.engine.update(delta_seconds * self.time_scale, &mut self.rng);
    }

    /// Tear down the current session and start one in another catalogue
    /// environment (or the same one, for a restart).
    fn switch_to(&mut self, env_index: usize) {
        self.engine.shutdown();
        let capabilities = self.engine.capabilities();
        let env = &ENVIRONMENTS[env_index % ENVIRONMENTS.len()];
        let config = SessionConfig::from_minutes(env.id, env.shortest_duration());
        self.engine = SessionEngine::new(config, capabilities, &mut self.rng);
        self.env_index = env_index % ENVIRONMENTS.len();
        self.begin();
    }

    fn enter_ar(&mut self) -> Result<(), MediaError> {
        self.engine.enter_ar(&mut self.media, &mut self.rng)
    }
}

#[derive(Resource)]
struct CameraState {
    yaw: f32,
    pitch: f32,
    distance: f32,
    dragging: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.35, // Slightly above the scene, looking down
            distance: 60.0,
            dragging: false,
        }
    }
}

/// Latest guidance line spoken by the coach.
#[derive(Resource, Default)]
struct GuidanceFeed {
    latest: Option<&'static str>,
}

// Marker component telling update_text_ui which HUD line an entity shows
#[derive(Component)]
enum HudItem {
    Environment,
    Clock,
    Metrics,
    Voice,
    Guidance,
}

fn setup(mut commands: Commands, mut session: ResMut<SessionWrapper>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 22.0, 60.0).looking_at(Vec3::new(0.0, 6.0, 0.0), Vec3::Y),
    ));

    session.begin();

    let hud_font = TextFont {
        font_size: 16.0,
        ..default()
    };

    commands.spawn((
        Text::new(""),
        hud_font.clone(),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudItem::Environment,
    ));

    commands.spawn((
        Text::new(""),
        hud_font.clone(),
        TextColor(Color::srgba(0.9, 0.9, 0.9, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(34.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudItem::Clock,
    ));

    commands.spawn((
        Text::new(""),
        hud_font.clone(),
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(56.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudItem::Metrics,
    ));

    commands.spawn((
        Text::new(""),
        hud_font.clone(),
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(78.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudItem::Voice,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgba(0.95, 0.95, 0.85, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudItem::Guidance,
    ));

    commands.spawn((
        Text::new(
            "space pause/resume | R restart | N next environment | V VR | A AR | X exit | +/- speed",
        ),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgba(0.6, 0.6, 0.6, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    let capabilities = session.engine.capabilities();
    info!(
        "{} session started with {} props (vr: {}, ar: {})",
        session.engine.environment_id(),
        session.engine.prop_count(),
        capabilities.vr(),
        capabilities.ar(),
    );
}

fn update_session(
    time: Res<Time>,
    mut session: ResMut<SessionWrapper>,
    mut guidance: ResMut<GuidanceFeed>,
) {
    session.update(time.delta_secs());

    for event in session.engine.drain_events() {
        match event {
            EngineEvent::Guidance(line) => {
                info!("coach: {}", line);
                guidance.latest = Some(line);
            }
            EngineEvent::Completed => {
                info!("session complete after {}", format_clock(session.engine.elapsed_secs()));
            }
            EngineEvent::Biometric(_) => {}
        }
    }
}

fn session_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionWrapper>,
    mut guidance: ResMut<GuidanceFeed>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        session.engine.toggle();
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        let index = session.env_index;
        session.switch_to(index);
        guidance.latest = None;
        info!("session restarted");
    }

    if keyboard.just_pressed(KeyCode::KeyN) {
        let next = (session.env_index + 1) % ENVIRONMENTS.len();
        session.switch_to(next);
        guidance.latest = None;
        info!("switched to {}", session.engine.environment_id());
    }

    if keyboard.just_pressed(KeyCode::KeyV) {
        let mode = session.engine.enter_vr();
        info!("entered {}", mode.label());
    }

    if keyboard.just_pressed(KeyCode::KeyA) {
        match session.enter_ar() {
            Ok(()) => info!("entered AR"),
            Err(e) => warn!("AR entry failed: {}", e),
        }
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        session.engine.exit_immersive();
    }

    // Time scale: +/= to speed up, - to slow down
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        session.time_scale = (session.time_scale * 2.0).min(32.0);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        session.time_scale = (session.time_scale / 2.0).max(0.25);
    }
}

fn camera_controls(
    mut camera_state: ResMut<CameraState>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut motion_events: EventReader<MouseMotion>,
) {
    let orbit_speed = 1.2;
    let zoom_speed = 0.1;
    let dt = 0.016;

    // Keyboard orbit
    if keyboard.pressed(KeyCode::ArrowLeft) {
        camera_state.yaw -= orbit_speed * dt;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        camera_state.yaw += orbit_speed * dt;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        camera_state.pitch += orbit_speed * dt;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        camera_state.pitch -= orbit_speed * dt;
    }

    // Mouse drag orbit
    camera_state.dragging =
        mouse_buttons.pressed(MouseButton::Middle) || mouse_buttons.pressed(MouseButton::Right);

    if camera_state.dragging {
        for motion in motion_events.read() {
            camera_state.yaw -= motion.delta.x * 0.005;
            camera_state.pitch += motion.delta.y * 0.005;
        }
    } else {
        motion_events.clear();
    }

    camera_state.pitch = camera_state.pitch.clamp(-0.4, 1.4);

    // Scroll zoom
    for scroll in scroll_events.read() {
        camera_state.distance *= 1.0 - scroll.y * zoom_speed;
        camera_state.distance = camera_state.distance.clamp(5.0, 600.0);
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        let focus = Vec3::new(0.0, 6.0, 0.0);
        let rotation = Quat::from_euler(EulerRot::YXZ, camera_state.yaw, -camera_state.pitch, 0.0);
        transform.translation = focus + rotation * Vec3::new(0.0, 0.0, camera_state.distance);
        transform.look_at(focus, Vec3::Y);
    }
}

fn render_props(session: Res<SessionWrapper>, mut gizmos: Gizmos) {
    for (_, (prop, placement, tint)) in session
        .engine
        .world
        .query::<(&Prop, &Placement, &Tint)>()
        .iter()
    {
        let color = tint_color(tint);
        let center = to_render(placement.position);

        match prop.shape {
            Shape::Sphere { radius } => {
                gizmos.sphere(
                    Isometry3d::from_translation(center),
                    radius * placement.scale,
                    color,
                );
            }
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                draw_cylinder(
                    &mut gizmos,
                    center,
                    radius_top * placement.scale,
                    radius_bottom * placement.scale,
                    height * placement.scale,
                    placement.rotation_y,
                    color,
                );
            }
            Shape::Cone { radius, height } => {
                draw_cone(
                    &mut gizmos,
                    center,
                    radius * placement.scale,
                    height * placement.scale,
                    placement.rotation_y,
                    color,
                );
            }
            Shape::Icosahedron { radius } => {
                // Drawn as a cuboid so the spin is visible
                let transform = Transform::from_translation(center)
                    .with_rotation(Quat::from_rotation_y(placement.rotation_y))
                    .with_scale(Vec3::splat(radius * placement.scale));
                gizmos.cuboid(transform, color);
            }
            Shape::Plane { width, depth } => {
                gizmos.rect(
                    Isometry3d::new(center, Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
                    Vec2::new(width, depth) * placement.scale,
                    color,
                );
            }
        }
    }
}

fn render_particles(session: Res<SessionWrapper>, mut gizmos: Gizmos) {
    for (_, (placement, field, tint)) in session
        .engine
        .world
        .query::<(&Placement, &ParticleField, &Tint)>()
        .iter()
    {
        let color = tint_color(tint);
        let origin = to_render(placement.position);
        let half = field.point_size / 2.0;

        // Fields run to 10,000 points; one short line each keeps the
        // frame cheap.
        for point in &field.points {
            let p = origin + to_render(*point);
            gizmos.line(p - Vec3::Y * half, p + Vec3::Y * half, color);
        }
    }
}

fn render_waves(session: Res<SessionWrapper>, mut gizmos: Gizmos) {
    for (_, (placement, wave, tint)) in session
        .engine
        .world
        .query::<(&Placement, &WaveSurface, &Tint)>()
        .iter()
    {
        let color = tint_color(tint);
        let origin = to_render(placement.position);
        let cols = (wave.segments_x + 1) as usize;
        let rows = (wave.segments_z + 1) as usize;

        let vertex = |index: usize| {
            let (x, z) = wave.vertex_xz(index);
            origin + Vec3::new(x, wave.heights[index], z)
        };

        // Wireframe of the displaced grid
        for row in 0..rows {
            for col in 0..cols {
                let index = row * cols + col;
                if col + 1 < cols {
                    gizmos.line(vertex(index), vertex(index + 1), color);
                }
                if row + 1 < rows {
                    gizmos.line(vertex(index), vertex(index + cols), color);
                }
            }
        }
    }
}

fn update_text_ui(
    session: Res<SessionWrapper>,
    guidance: Res<GuidanceFeed>,
    mut texts: Query<(&mut Text, &HudItem)>,
) {
    let engine = &session.engine;

    for (mut text, item) in &mut texts {
        **text = match item {
            HudItem::Environment => {
                let name = catalogue::find(engine.environment_id())
                    .map(|env| env.name)
                    .unwrap_or(engine.environment_id());
                let fallback = if engine.is_fallback_scene() {
                    " (fallback scene)"
                } else {
                    ""
                };
                let mode = match engine.immersive_mode() {
                    ImmersiveMode::Standard => String::new(),
                    mode => format!(" [{}]", mode.label()),
                };
                format!("{}{}{}", name, fallback, mode)
            }
            HudItem::Clock => {
                let speed = if session.time_scale != 1.0 {
                    format!("  ({}x)", session.time_scale)
                } else {
                    String::new()
                };
                format!(
                    "{} remaining - {}{}",
                    format_clock(engine.remaining_secs()),
                    phase_label(engine.phase()),
                    speed,
                )
            }
            HudItem::Metrics => {
                let m = engine.metrics();
                format!(
                    "heart {:.0} bpm | stress {:.0} | breathing {:.1}/min | focus {:.0} | mindfulness {:.0}",
                    m.heart_rate, m.stress, m.breathing_rate, m.focus, m.mindfulness,
                )
            }
            HudItem::Voice => match engine.voice_analysis() {
                Some(v) => format!(
                    "voice: {} (stress {:.0}, stability {:.0})",
                    v.emotional_state.label(),
                    v.stress,
                    v.stability,
                ),
                None => String::new(),
            },
            HudItem::Guidance => guidance.latest.unwrap_or("").to_string(),
        };
    }
}

fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Running => "running",
        SessionPhase::Paused => "paused",
        SessionPhase::Completed => "complete",
    }
}

fn tint_color(tint: &Tint) -> Color {
    Color::srgba(tint.color.r, tint.color.g, tint.color.b, tint.opacity)
}

fn to_render(v: SimVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn draw_cylinder(
    gizmos: &mut Gizmos,
    center: Vec3,
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    rotation_y: f32,
    color: Color,
) {
    let top = center + Vec3::Y * (height / 2.0);
    let bottom = center - Vec3::Y * (height / 2.0);
    let flat = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    gizmos.circle(Isometry3d::new(top, flat), radius_top, color);
    gizmos.circle(Isometry3d::new(bottom, flat), radius_bottom, color);

    for i in 0..4 {
        let angle = i as f32 / 4.0 * std::f32::consts::TAU + rotation_y;
        let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
        gizmos.line(bottom + dir * radius_bottom, top + dir * radius_top, color);
    }
}

fn draw_cone(
    gizmos: &mut Gizmos,
    center: Vec3,
    radius: f32,
    height: f32,
    rotation_y: f32,
    color: Color,
) {
    let apex = center + Vec3::Y * (height / 2.0);
    let base = center - Vec3::Y * (height / 2.0);
    let flat = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    gizmos.circle(Isometry3d::new(base, flat), radius, color);

    for i in 0..4 {
        let angle = i as f32 / 4.0 * std::f32::consts::TAU + rotation_y;
        let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
        gizmos.line(base + dir * radius, apex, color);
    }
}
