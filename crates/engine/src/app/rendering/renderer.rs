use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::canvas::Canvas;
use super::compose::DrawCommand;
use super::textures::TextureSet;
use super::Viewport;

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Presents composed frames through a `pixels` surface.
///
/// The frame buffer keeps the configured viewport size; the window surface follows the
/// window and `pixels` scales between the two.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    textures: TextureSet,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        viewport: Viewport,
        textures: TextureSet,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), viewport, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport,
            textures,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), self.viewport, width, height)?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        viewport: Viewport,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width.max(1), surface_height.max(1), window);
        Pixels::new(viewport.width, viewport.height, surface)
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        let frame = self.pixels.frame_mut();
        let mut canvas = Canvas::new(frame, self.viewport.width, self.viewport.height);
        draw_commands(&mut canvas, &self.textures, commands);
        self.pixels.render()
    }
}

pub(crate) fn draw_commands(
    canvas: &mut Canvas<'_>,
    textures: &TextureSet,
    commands: &[DrawCommand],
) {
    canvas.clear(CLEAR_COLOR);
    for command in commands {
        match *command {
            DrawCommand::Texture { texture, rect } => canvas.blit(textures.get(texture), rect),
            DrawCommand::FillRect { color, rect } => canvas.fill_rect(rect, color),
            DrawCommand::Line { from, to, color } => canvas.draw_line(from, to, color),
        }
    }
}
