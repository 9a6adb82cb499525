mod grid;
mod motion;
mod particles;
mod shadow;

pub use grid::{Cell, MapError, OccupancyGrid, GRID_HEIGHT, GRID_WIDTH};
pub use motion::{
    try_move, MotionController, MotionIntent, Pose, DEFAULT_MOVE_SPEED, DEFAULT_ROTATION_SPEED,
};
pub use particles::{
    Particle, ParticleConfig, ParticleSystem, DEFAULT_MAX_PARTICLES, DEFAULT_PARTICLE_SPEED,
};
pub use shadow::{facing_dot, is_shadowed, is_within_lit_cone, LIT_CONE_THRESHOLD};
