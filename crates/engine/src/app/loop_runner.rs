use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::{ActionStates, KeyEdge};
use super::metrics::MetricsAccumulator;
use super::rendering::{Renderer, SceneComposer, TextureSet, Viewport};
use super::{InputAction, InputSnapshot, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub viewport: Viewport,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
    pub asset_dir: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Raycasting Example".to_string(),
            viewport: Viewport::default(),
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            max_render_fps: None,
            asset_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to present frame: {0}")]
    Present(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens the window and drives `scene` until the window closes, Escape is pressed or the
/// scene asks to quit.
///
/// Window, surface and textures are owned by the loop and dropped on every exit path.
pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.viewport.width as f64,
                config.viewport.height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );

    let textures = TextureSet::load(&config.asset_dir);
    info!(
        asset_dir = %config.asset_dir.display(),
        placeholder_count = textures.placeholder_count(),
        "textures_ready"
    );
    let mut renderer = Renderer::new(Arc::clone(&window), config.viewport, textures)
        .map_err(AppError::CreateRenderer)?;
    let composer = SceneComposer::new(config.viewport);

    event_loop.set_control_flow(ControlFlow::Poll);

    let mut pacing = FramePacing::new(&config);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt_seconds = pacing.fixed_dt.as_secs_f32();
    info!(
        target_tps = config.target_tps.max(1),
        max_frame_delta_ms = pacing.max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = pacing.max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        render_fps_cap = %format_render_cap(pacing.render_fps_cap),
        viewport_width = config.viewport.width,
        viewport_height = config.viewport.height,
        "loop_config"
    );

    scene.load();

    let mut input_collector = InputCollector::default();
    let mut draw_commands = Vec::new();
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;
    let mut present_failure: Option<PixelsError> = None;
    let present_failure_slot = &mut present_failure;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    input_collector.release_held_actions();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let step_plan = pacing.plan(raw_frame_dt);
                    for _ in 0..step_plan.ticks_to_run {
                        let input_snapshot = input_collector.snapshot_for_tick();
                        let command = scene.update(fixed_dt_seconds, &input_snapshot);
                        metrics_accumulator.record_tick();
                        if command == SceneCommand::Quit {
                            info!(reason = "scene_quit", "shutdown_requested");
                            window_target.exit();
                            break;
                        }
                    }
                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame = pacing.max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep = pacing.cap_sleep(elapsed_since_last_present);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    scene.render(&composer, &mut draw_commands);
                    if let Err(error) = renderer.render(&draw_commands) {
                        warn!(error = %error, "renderer_draw_failed");
                        *present_failure_slot = Some(error);
                        window_target.exit();
                        return;
                    }
                    last_present_instant = Instant::now();

                    let next_title = scene.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }

                    metrics_accumulator.record_frame(raw_frame_dt);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            draw_commands = draw_commands.len(),
                            particles = scene.live_particle_count(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                scene.unload();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)?;

    match present_failure {
        Some(error) => Err(AppError::Present(error)),
        None => Ok(()),
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    action_states: ActionStates,
    rain_toggle: KeyEdge,
    map_toggle: KeyEdge,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(action) = action_for_key(code) else {
            return;
        };
        self.action_states.set(action, is_pressed);
        match action {
            InputAction::ToggleRain => self.rain_toggle.handle(is_pressed),
            InputAction::ToggleMap => self.map_toggle.handle(is_pressed),
            InputAction::Quit if is_pressed => self.mark_quit_requested(),
            _ => {}
        }
    }

    /// Drops every held key, so a key released while the window is unfocused does not stay
    /// stuck down.
    fn release_held_actions(&mut self) {
        self.action_states = ActionStates::default();
        self.rain_toggle.handle(false);
        self.map_toggle.handle(false);
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            self.rain_toggle.take(),
            self.map_toggle.take(),
        )
    }
}

fn action_for_key(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::KeyW => Some(InputAction::MoveForward),
        KeyCode::KeyS => Some(InputAction::MoveBackward),
        KeyCode::KeyA => Some(InputAction::StrafeLeft),
        KeyCode::KeyD => Some(InputAction::StrafeRight),
        KeyCode::ArrowLeft => Some(InputAction::RotateLeft),
        KeyCode::ArrowRight => Some(InputAction::RotateRight),
        KeyCode::KeyR => Some(InputAction::ToggleRain),
        KeyCode::KeyM => Some(InputAction::ToggleMap),
        KeyCode::Escape => Some(InputAction::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepPlan {
    ticks_to_run: u32,
    dropped_backlog: Duration,
}

/// Fixed-timestep accumulator plus the optional render cap.
#[derive(Debug)]
struct FramePacing {
    fixed_dt: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    render_fps_cap: Option<u32>,
    accumulator: Duration,
}

impl FramePacing {
    fn new(config: &LoopConfig) -> Self {
        let target_tps = config.target_tps.max(1);
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / target_tps as f64),
            max_frame_delta: normalize_non_zero_duration(
                config.max_frame_delta,
                Duration::from_millis(250),
            ),
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            render_fps_cap: config.max_render_fps.filter(|fps| *fps > 0),
            accumulator: Duration::ZERO,
        }
    }

    /// Adds one frame's elapsed time and returns how many fixed ticks to run. Backlog past
    /// `max_ticks_per_frame` is dropped rather than carried into the next frame.
    fn plan(&mut self, frame_dt: Duration) -> StepPlan {
        let clamped = frame_dt.min(self.max_frame_delta);
        self.accumulator = self.accumulator.saturating_add(clamped);

        let mut ticks_to_run = 0u32;
        while self.accumulator >= self.fixed_dt && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator = self.accumulator.saturating_sub(self.fixed_dt);
            ticks_to_run = ticks_to_run.saturating_add(1);
        }

        let dropped_backlog = if self.accumulator >= self.fixed_dt {
            std::mem::take(&mut self.accumulator)
        } else {
            Duration::ZERO
        };
        StepPlan {
            ticks_to_run,
            dropped_backlog,
        }
    }

    fn cap_sleep(&self, elapsed_since_present: Duration) -> Duration {
        match self.render_fps_cap {
            Some(fps) => {
                let frame_target = Duration::from_secs_f64(1.0 / fps as f64);
                frame_target.saturating_sub(elapsed_since_present)
            }
            None => Duration::ZERO,
        }
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}
