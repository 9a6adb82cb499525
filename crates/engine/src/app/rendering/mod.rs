mod canvas;
mod compose;
mod renderer;
mod textures;
mod transform;

pub use compose::{
    DrawCommand, SceneComposer, SceneFrame, TextureKey, WeaponSlot, DEFAULT_WEAPON_SIZE_PX,
    PLAYER_MARKER_COLOR, PLAYER_MARKER_SIZE_PX, RAINDROP_SIZE_PX, SIGHT_LINE_COLOR,
    SIGHT_LINE_LENGTH_PX,
};
pub use renderer::Renderer;
pub use textures::{load_texture, Texture, TextureLoadError, TextureSet};
pub use transform::{ScreenRect, TileLayout, Viewport};
