use crate::world::{GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }
}

/// Grid-to-screen mapping.
///
/// Tile sizes use integer division of the viewport by the grid size, so adjacent tiles share
/// edges exactly. When the viewport is not a multiple of the grid size the leftover pixels
/// stay on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileLayout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            tile_width: viewport.width / GRID_WIDTH as u32,
            tile_height: viewport.height / GRID_HEIGHT as u32,
        }
    }

    pub fn cell_rect(&self, cell_x: usize, cell_y: usize) -> ScreenRect {
        ScreenRect::new(
            (cell_x as u32 * self.tile_width) as i32,
            (cell_y as u32 * self.tile_height) as i32,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Continuous grid coordinates to screen pixels, before any rounding.
    pub fn grid_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.tile_width as f32, y * self.tile_height as f32)
    }
}
