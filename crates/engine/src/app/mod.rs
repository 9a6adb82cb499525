mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    load_texture, DrawCommand, Renderer, SceneComposer, SceneFrame, ScreenRect, Texture,
    TextureKey, TextureLoadError, TextureSet, TileLayout, Viewport, WeaponSlot,
    DEFAULT_WEAPON_SIZE_PX, PLAYER_MARKER_COLOR, PLAYER_MARKER_SIZE_PX, RAINDROP_SIZE_PX,
    SIGHT_LINE_COLOR, SIGHT_LINE_LENGTH_PX,
};
pub use scene::{InputSnapshot, Scene, SceneCommand};
