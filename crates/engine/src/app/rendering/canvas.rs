use super::textures::Texture;
use super::transform::ScreenRect;

/// Clipped RGBA8 drawing over a borrowed frame buffer.
pub(crate) struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub(crate) fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub(crate) fn fill_rect(&mut self, rect: ScreenRect, color: [u8; 4]) {
        let Some((left, top, right, bottom)) = self.clip(rect) else {
            return;
        };
        for y in top..bottom {
            for x in left..right {
                self.write_pixel(x, y, color);
            }
        }
    }

    /// Nearest-neighbour blit of `texture` stretched over `rect`. Fully transparent texels
    /// are skipped.
    pub(crate) fn blit(&mut self, texture: &Texture, rect: ScreenRect) {
        if texture.width == 0 || texture.height == 0 || rect.width == 0 || rect.height == 0 {
            return;
        }
        let expected_rgba_len = texture.width as usize * texture.height as usize * 4;
        if texture.rgba.len() < expected_rgba_len {
            return;
        }
        let Some((left, top, right, bottom)) = self.clip(rect) else {
            return;
        };

        let texture_width = texture.width as usize;
        for out_y in top..bottom {
            let dy = (out_y - rect.y) as u64;
            let src_y = (dy * texture.height as u64 / rect.height as u64) as usize;
            let src_y = src_y.min(texture.height as usize - 1);
            for out_x in left..right {
                let dx = (out_x - rect.x) as u64;
                let src_x = (dx * texture.width as u64 / rect.width as u64) as usize;
                let src_x = src_x.min(texture_width - 1);
                let src_offset = (src_y * texture_width + src_x) * 4;
                let texel = [
                    texture.rgba[src_offset],
                    texture.rgba[src_offset + 1],
                    texture.rgba[src_offset + 2],
                    texture.rgba[src_offset + 3],
                ];
                if texel[3] == 0 {
                    continue;
                }
                self.write_pixel(out_x, out_y, texel);
            }
        }
    }

    /// Bresenham line, inclusive of both endpoints.
    pub(crate) fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: [u8; 4]) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let step_x = if x < to.0 { 1 } else { -1 };
        let step_y = if y < to.1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.write_pixel(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn clip(&self, rect: ScreenRect) -> Option<(i32, i32, i32, i32)> {
        let left = rect.x.max(0);
        let top = rect.y.max(0);
        let right = rect.right().min(self.width as i32);
        let bottom = rect.bottom().min(self.height as i32);
        (left < right && top < bottom).then_some((left, top, right, bottom))
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let pixel_offset = y as usize * self.width as usize + x as usize;
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        let Some(end) = byte_offset.checked_add(4) else {
            return;
        };
        if end > self.frame.len() {
            return;
        }
        self.frame[byte_offset..end].copy_from_slice(&color);
    }
}
