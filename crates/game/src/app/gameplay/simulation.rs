use tracing::{debug, info, warn};
use walls_engine::world::{
    DEFAULT_MAX_PARTICLES, DEFAULT_MOVE_SPEED, DEFAULT_PARTICLE_SPEED, DEFAULT_ROTATION_SPEED,
};
use walls_engine::{
    InputSnapshot, MotionController, OccupancyGrid, ParticleConfig, ParticleSystem, Pose,
    SceneFrame, Viewport, WeaponSlot,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SimulationConfig {
    pub(crate) move_speed: f32,
    pub(crate) rotation_speed: f32,
    pub(crate) spawn: Pose,
    pub(crate) rain_capacity: usize,
    pub(crate) rain_speed: f32,
    pub(crate) rain_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            spawn: Pose::default(),
            rain_capacity: DEFAULT_MAX_PARTICLES,
            rain_speed: DEFAULT_PARTICLE_SPEED,
            rain_seed: None,
        }
    }
}

/// All mutable game state for one session: the loaded map, the player, the rain overlay and
/// the two display toggles.
#[derive(Debug)]
pub(crate) struct SimulationState {
    grid: OccupancyGrid,
    pose: Pose,
    motion: MotionController,
    rain: ParticleSystem,
    rain_enabled: bool,
    show_grid: bool,
    weapon: WeaponSlot,
    tick_count: u64,
}

impl SimulationState {
    pub(crate) fn new(grid: OccupancyGrid, config: SimulationConfig, viewport: Viewport) -> Self {
        if grid.is_wall(config.spawn.x, config.spawn.y) {
            warn!(
                x = config.spawn.x,
                y = config.spawn.y,
                "spawn_pose_inside_wall"
            );
        }
        let rain = ParticleSystem::new(ParticleConfig {
            viewport_width: viewport.width as f32,
            viewport_height: viewport.height as f32,
            speed: config.rain_speed,
            max_particles: config.rain_capacity,
            seed: config.rain_seed,
        });
        Self {
            grid,
            pose: config.spawn,
            motion: MotionController::new(config.move_speed, config.rotation_speed),
            rain,
            rain_enabled: false,
            show_grid: true,
            weapon: WeaponSlot::default(),
            tick_count: 0,
        }
    }

    /// Advances one tick: toggles first, then player motion, then rain while it is enabled.
    /// Disabled rain keeps its drops frozen in place until it is switched back on.
    pub(crate) fn step(&mut self, input: &InputSnapshot) {
        if input.rain_toggle_pressed() {
            self.rain_enabled = !self.rain_enabled;
            info!(
                rain_enabled = self.rain_enabled,
                live_particles = self.rain.len(),
                "rain_toggled"
            );
        }
        if input.map_toggle_pressed() {
            self.show_grid = !self.show_grid;
            info!(show_grid = self.show_grid, "map_toggled");
        }

        self.pose = self.motion.step(&self.grid, self.pose, input.motion_intent());

        if self.rain_enabled {
            let evicted_before = self.rain.evicted_total();
            self.rain.tick();
            if self.rain.evicted_total() > evicted_before {
                debug!(
                    capacity = self.rain.config().max_particles,
                    evicted_total = self.rain.evicted_total(),
                    "rain_capacity_reached"
                );
            }
        }
        self.tick_count = self.tick_count.saturating_add(1);
    }

    pub(crate) fn scene_frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            grid: &self.grid,
            pose: self.pose,
            rain: self.rain_enabled.then_some(&self.rain),
            weapon: self.weapon,
            show_grid: self.show_grid,
        }
    }

    pub(crate) fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub(crate) fn pose(&self) -> Pose {
        self.pose
    }

    pub(crate) fn rain(&self) -> &ParticleSystem {
        &self.rain
    }

    pub(crate) fn rain_enabled(&self) -> bool {
        self.rain_enabled
    }

    pub(crate) fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub(crate) fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
