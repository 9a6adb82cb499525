use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::{info, warn};

use super::compose::TextureKey;

const TEXTURE_COUNT: usize = TextureKey::ALL.len();

/// Decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: color.to_vec(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("failed to open texture {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Every texture the scene draws with.
///
/// A texture that fails to load is replaced by a solid placeholder colour, so drawing never
/// touches a missing image.
#[derive(Debug, Clone)]
pub struct TextureSet {
    textures: [Texture; TEXTURE_COUNT],
    placeholders: [bool; TEXTURE_COUNT],
}

impl Default for TextureSet {
    fn default() -> Self {
        Self::placeholders()
    }
}

impl TextureSet {
    pub fn placeholders() -> Self {
        Self {
            textures: TextureKey::ALL.map(|key| Texture::solid(placeholder_color(key))),
            placeholders: [true; TEXTURE_COUNT],
        }
    }

    pub fn load(asset_dir: &Path) -> Self {
        let mut set = Self::placeholders();
        for key in TextureKey::ALL {
            let path = asset_dir.join(key.file_name());
            match load_texture(&path) {
                Ok(texture) => {
                    info!(
                        texture = key.file_name(),
                        width = texture.width,
                        height = texture.height,
                        "texture_loaded"
                    );
                    set.insert(key, texture);
                }
                Err(error) => {
                    warn!(
                        texture = key.file_name(),
                        error = %error,
                        "texture_load_failed_using_placeholder"
                    );
                }
            }
        }
        set
    }

    pub fn insert(&mut self, key: TextureKey, texture: Texture) {
        self.textures[key.index()] = texture;
        self.placeholders[key.index()] = false;
    }

    pub fn get(&self, key: TextureKey) -> &Texture {
        &self.textures[key.index()]
    }

    pub fn is_placeholder(&self, key: TextureKey) -> bool {
        self.placeholders[key.index()]
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.iter().filter(|missing| **missing).count()
    }
}

pub fn load_texture(path: &Path) -> Result<Texture, TextureLoadError> {
    let reader = ImageReader::open(path).map_err(|source| TextureLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| TextureLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    Ok(Texture {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn placeholder_color(key: TextureKey) -> [u8; 4] {
    match key {
        TextureKey::Wall => [112, 83, 58, 255],
        TextureKey::Floor => [74, 112, 56, 255],
        TextureKey::Ceiling => [68, 74, 92, 255],
        TextureKey::Weapon => [200, 200, 210, 255],
        TextureKey::Raindrop => [0, 0, 255, 255],
    }
}
