use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::collision::Rect;

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = u16::from(src) * alpha + u16::from(dst) * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b;
    dest[2] = g;
    dest[3] = r;
}

/// RGBA8888 pixel buffer every lesson draws into.
///
/// Matches the streaming texture format the window uploads, so presenting a
/// frame is a single copy.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (640x480)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }

    /// Clear to a solid color
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        let pixel = u32::from_ne_bytes([255, b, g, r]);
        let ptr = self.pixels.as_mut_ptr().cast::<u32>();
        let len = self.pixels.len() / 4;
        for i in 0..len {
            // Safety: i < len keeps the write inside the Vec, and
            // write_unaligned makes no alignment assumption about Vec<u8>.
            unsafe {
                ptr.add(i).write_unaligned(pixel);
            }
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Set pixel with alpha blending; the result stays opaque
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        match a {
            0 => {},
            255 => self.set_pixel(x, y, r, g, b),
            _ if self.in_bounds(x, y) => {
                let idx = self.pixel_index(x as u32, y as u32);
                let alpha = u16::from(a);
                self.pixels[idx] = 255;
                self.pixels[idx + 1] = blend_channel(b, self.pixels[idx + 1], alpha);
                self.pixels[idx + 2] = blend_channel(g, self.pixels[idx + 2], alpha);
                self.pixels[idx + 3] = blend_channel(r, self.pixels[idx + 3], alpha);
            },
            _ => {},
        }
    }

    /// Read a pixel as (r, g, b), or None when out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((self.pixels[idx + 3], self.pixels[idx + 2], self.pixels[idx + 1]))
        } else {
            None
        }
    }

    /// Horizontal line from x1 to x2 inclusive
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        if y < 0 || y as u32 >= self.height || self.width == 0 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = i64::from(x2).min(i64::from(self.width) - 1) as i32;
        if start > end {
            return;
        }

        let mut idx = self.pixel_index(start as u32, y as u32);
        for _ in start..=end {
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
            idx += 4;
        }
    }

    /// Vertical line from y1 to y2 inclusive
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, r: u8, g: u8, b: u8) {
        if x < 0 || x as u32 >= self.width || self.height == 0 {
            return;
        }
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let start = y1.max(0);
        let end = i64::from(y2).min(i64::from(self.height) - 1) as i32;
        if start > end {
            return;
        }

        let stride = (self.width as usize) * 4;
        let mut idx = self.pixel_index(x as u32, start as u32);
        for _ in start..=end {
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
            idx += stride;
        }
    }

    /// Bresenham line, clipped to the buffer first
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        let Some((x0, y0, x1, y1)) = self.clip_line(x0, y0, x1, y1) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, r, g, b);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Cohen-Sutherland clipping against the buffer bounds.
    /// Returns the visible segment, or None if nothing is on screen.
    fn clip_line(
        &self,
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
    ) -> Option<(i32, i32, i32, i32)> {
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const BOTTOM: u8 = 4;
        const TOP: u8 = 8;
        // Converges in at most 4 rounds for valid input
        const MAX_ITERATIONS: u32 = 16;

        let w = i64::from(self.width);
        let h = i64::from(self.height);
        if w == 0 || h == 0 {
            return None;
        }

        let outcode = |x: i32, y: i32| -> u8 {
            let (x, y) = (i64::from(x), i64::from(y));
            let mut code = 0;
            if x < 0 {
                code |= LEFT;
            } else if x >= w {
                code |= RIGHT;
            }
            if y < 0 {
                code |= TOP;
            } else if y >= h {
                code |= BOTTOM;
            }
            code
        };

        let mut code0 = outcode(x0, y0);
        let mut code1 = outcode(x1, y1);

        for _ in 0..MAX_ITERATIONS {
            if (code0 | code1) == 0 {
                return Some((x0, y0, x1, y1));
            }
            if (code0 & code1) != 0 {
                return None;
            }

            let code_out = if code0 != 0 { code0 } else { code1 };
            let (fx0, fy0) = (i64::from(x0), i64::from(y0));
            let dx = i64::from(x1) - fx0;
            let dy = i64::from(y1) - fy0;

            let (x, y) = if (code_out & BOTTOM) != 0 {
                (fx0 + dx * (h - 1 - fy0) / dy, h - 1)
            } else if (code_out & TOP) != 0 {
                (fx0 + dx * -fy0 / dy, 0)
            } else if (code_out & RIGHT) != 0 {
                (w - 1, fy0 + dy * (w - 1 - fx0) / dx)
            } else {
                (0, fy0 + dy * -fx0 / dx)
            };
            // Interpolated points lie between the endpoints, so they fit in i32
            let (x, y) = (x as i32, y as i32);

            if code_out == code0 {
                (x0, y0) = (x, y);
                code0 = outcode(x0, y0);
            } else {
                (x1, y1) = (x, y);
                code1 = outcode(x1, y1);
            }
        }

        None
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, rect: Rect, r: u8, g: u8, b: u8) {
        if rect.w == 0 {
            return;
        }
        let right = (rect.right() - 1).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let top = rect.top().max(0);
        let bottom = rect.bottom().min(i64::from(self.height));
        for y in top..bottom {
            self.hline(rect.x, right, y as i32, r, g, b);
        }
    }

    /// One pixel outline of a rectangle
    pub fn draw_rect(&mut self, rect: Rect, r: u8, g: u8, b: u8) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let right = clamp(rect.right() - 1);
        let bottom = clamp(rect.bottom() - 1);
        self.hline(rect.x, right, rect.y, r, g, b);
        self.hline(rect.x, right, bottom, r, g, b);
        self.vline(rect.x, rect.y, bottom, r, g, b);
        self.vline(right, rect.y, bottom, r, g, b);
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_color(buffer: &PixelBuffer, color: (u8, u8, u8)) -> usize {
        let mut n = 0;
        for y in 0..buffer.height() as i32 {
            for x in 0..buffer.width() as i32 {
                if buffer.get_pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_clear_and_byte_order() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.clear(10, 20, 30);
        assert_eq!(buffer.get_pixel(1, 1), Some((10, 20, 30)));
        assert_eq!(&buffer.as_bytes()[..4], &[255, 30, 20, 10]);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        buffer.set_pixel(-1, 0, 255, 0, 0);
        buffer.set_pixel(4, 0, 255, 0, 0);
        assert_eq!(buffer.get_pixel(4, 0), None);
        assert_eq!(count_color(&buffer, (255, 0, 0)), 0);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        buffer.fill_rect(Rect::new(-5, -5, 8, 8), 0, 255, 0);
        assert_eq!(count_color(&buffer, (0, 255, 0)), 9);
        buffer.fill_rect(Rect::new(8, 8, 100, 100), 0, 0, 255);
        assert_eq!(count_color(&buffer, (0, 0, 255)), 4);
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        buffer.draw_rect(Rect::new(1, 1, 4, 3), 255, 255, 255);
        // 4 + 4 + 1 + 1 border pixels
        assert_eq!(count_color(&buffer, (255, 255, 255)), 10);
        assert_eq!(buffer.get_pixel(2, 2), Some((0, 0, 0)));
        assert_eq!(buffer.get_pixel(4, 3), Some((255, 255, 255)));
    }

    #[test]
    fn test_line_is_clipped() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        buffer.line(-20, 5, 30, 5, 255, 0, 0);
        assert_eq!(count_color(&buffer, (255, 0, 0)), 10);

        buffer.line(-20, -20, -1, -1, 0, 255, 0);
        assert_eq!(count_color(&buffer, (0, 255, 0)), 0);
    }

    #[test]
    fn test_blend_pixel_midpoint() {
        let mut buffer = PixelBuffer::with_size(1, 1);
        buffer.clear(0, 0, 0);
        buffer.blend_pixel(0, 0, 255, 255, 255, 128);
        let (r, g, b) = buffer.get_pixel(0, 0).unwrap();
        assert!((127..=129).contains(&r));
        assert_eq!((r, g), (g, b));

        buffer.blend_pixel(0, 0, 255, 0, 0, 0);
        assert_eq!(buffer.get_pixel(0, 0), Some((r, g, b)));
    }
}
