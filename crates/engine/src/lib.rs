pub mod app;
pub mod world;

pub use app::{
    load_texture, run_app, AppError, DrawCommand, InputAction, InputSnapshot, LoopConfig,
    LoopMetricsSnapshot, Renderer, Scene, SceneCommand, SceneComposer, SceneFrame, ScreenRect,
    Texture, TextureKey, TextureLoadError, TextureSet, TileLayout, Viewport, WeaponSlot,
};
pub use world::{
    is_shadowed, try_move, Cell, MapError, MotionController, MotionIntent, OccupancyGrid, Particle,
    ParticleConfig, ParticleSystem, Pose, GRID_HEIGHT, GRID_WIDTH,
};
