//! Software textures for the lessons
//!
//! Textures are decoded with the `image` crate, color keyed, and drawn into
//! a `PixelBuffer` with color and alpha modulation. When an asset is missing
//! a procedural stand-in of the same shape is used so every lesson still runs.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::collision::Rect;
use crate::display::PixelBuffer;

/// Pixels of exactly this color become fully transparent on load
pub const COLOR_KEY: (u8, u8, u8) = (0, 255, 255);

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("unable to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("expected {expected} bytes of pixel data for {width}x{height}, got {actual}")]
    Size {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("expected a {width}x{height} texture, got {actual_width}x{actual_height}")]
    Dimensions {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Multiply two 0..=255 intensities
#[inline]
fn mul8(a: u8, b: u8) -> u8 {
    ((u16::from(a) * u16::from(b) + 127) / 255) as u8
}

/// An RGBA texture, 4 bytes per pixel in R, G, B, A order
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    color: (u8, u8, u8),
    alpha: u8,
}

impl Texture {
    /// Create a fully transparent texture
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_pixels(width, height, vec![0; byte_len(width, height)])
    }

    fn with_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            color: (255, 255, 255),
            alpha: 255,
        }
    }

    /// Create texture from raw RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(TextureError::Size {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::with_pixels(width, height, data))
    }

    /// Build a texture by evaluating `f` for every texel
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(byte_len(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::with_pixels(width, height, pixels)
    }

    /// Decode an image file and color key it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| TextureError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        debug!("Loaded {}x{} image from {}", width, height, path.display());

        let mut texture = Self::from_rgba(width, height, image.into_raw())?;
        texture.apply_color_key(COLOR_KEY);
        Ok(texture)
    }

    /// Load `path`, falling back to `fallback()` if it cannot be read
    pub fn load_or(path: impl AsRef<Path>, fallback: impl FnOnce() -> Self) -> Self {
        match Self::load(path) {
            Ok(texture) => texture,
            Err(e) => {
                warn!("{e}; using a generated stand-in");
                fallback()
            },
        }
    }

    fn apply_color_key(&mut self, key: (u8, u8, u8)) {
        for px in self.pixels.chunks_exact_mut(4) {
            if (px[0], px[1], px[2]) == key {
                px[3] = 0;
            }
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

    /// Color modulation applied when rendering
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.color = (r, g, b);
    }

    /// Alpha modulation applied when rendering
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    /// Stored RGBA value of a texel, before modulation
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    /// Replace all pixel data, as when updating a streaming texture
    pub fn copy_pixels(&mut self, data: &[u8]) -> Result<(), TextureError> {
        if data.len() != self.pixels.len() {
            return Err(TextureError::Size {
                width: self.width,
                height: self.height,
                expected: self.pixels.len(),
                actual: data.len(),
            });
        }
        self.pixels.copy_from_slice(data);
        Ok(())
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn draw_texel(&self, buffer: &mut PixelBuffer, dx: i32, dy: i32, sx: u32, sy: u32) {
        if let Some([r, g, b, a]) = self.pixel(sx, sy) {
            let (cr, cg, cb) = self.color;
            buffer.blend_pixel(
                dx,
                dy,
                mul8(r, cr),
                mul8(g, cg),
                mul8(b, cb),
                mul8(a, self.alpha),
            );
        }
    }

    /// Draw at (x, y), optionally only the `clip` region of the texture
    pub fn render(&self, buffer: &mut PixelBuffer, x: i32, y: i32, clip: Option<Rect>) {
        let full = Rect::new(0, 0, self.width, self.height);
        let clip = clip.unwrap_or(full);
        for row in 0..clip.h {
            for col in 0..clip.w {
                let (Ok(sx), Ok(sy)) = (
                    u32::try_from(i64::from(clip.x) + i64::from(col)),
                    u32::try_from(i64::from(clip.y) + i64::from(row)),
                ) else {
                    continue;
                };
                self.draw_texel(buffer, x + col as i32, y + row as i32, sx, sy);
            }
        }
    }

    /// Stretch the whole texture over `dst` (nearest neighbor)
    pub fn render_scaled(&self, buffer: &mut PixelBuffer, dst: Rect) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for row in 0..dst.h {
            let sy = (u64::from(row) * u64::from(self.height) / u64::from(dst.h)) as u32;
            for col in 0..dst.w {
                let sx = (u64::from(col) * u64::from(self.width) / u64::from(dst.w)) as u32;
                self.draw_texel(buffer, dst.x + col as i32, dst.y + row as i32, sx, sy);
            }
        }
    }

    /// Draw with the top-left corner at (x, y), rotated clockwise by
    /// `angle` degrees about the texture center
    pub fn render_rotated(&self, buffer: &mut PixelBuffer, x: i32, y: i32, angle: f64) {
        let (sin, cos) = angle.to_radians().sin_cos();
        let half_w = f64::from(self.width) / 2.0;
        let half_h = f64::from(self.height) / 2.0;
        let cx = f64::from(x) + half_w;
        let cy = f64::from(y) + half_h;
        let reach = half_w.hypot(half_h).ceil() as i32;

        let (ox, oy) = (cx.floor() as i32, cy.floor() as i32);
        for dy in oy - reach..=oy + reach {
            for dx in ox - reach..=ox + reach {
                // Map the destination pixel center back into texture space
                let px = f64::from(dx) + 0.5 - cx;
                let py = f64::from(dy) + 0.5 - cy;
                let sx = px * cos + py * sin + half_w;
                let sy = -px * sin + py * cos + half_h;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                self.draw_texel(buffer, dx, dy, sx as u32, sy as u32);
            }
        }
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 4
}

// ============================================================================
// Procedural stand-ins for missing assets
// ============================================================================

const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn in_disc(x: u32, y: u32, cx: f32, cy: f32, r: f32) -> bool {
    let dx = x as f32 + 0.5 - cx;
    let dy = y as f32 + 0.5 - cy;
    dx * dx + dy * dy <= r * r
}

impl Texture {
    /// 20x20 white dot with a dark rim
    pub fn dot() -> Self {
        Self::from_fn(20, 20, |x, y| {
            if in_disc(x, y, 10.0, 10.0, 8.5) {
                [255, 255, 255, 255]
            } else if in_disc(x, y, 10.0, 10.0, 10.0) {
                [40, 40, 40, 255]
            } else {
                CLEAR
            }
        })
    }

    /// Arrow pointing right (angle 0)
    pub fn arrow() -> Self {
        const W: u32 = 120;
        const H: u32 = 60;
        Self::from_fn(W, H, |x, y| {
            let mid = H / 2;
            let shaft = x < 80 && y.abs_diff(mid) <= 8;
            // Head narrows from full height at x=80 to a point at x=W
            let head = x >= 80 && y.abs_diff(mid) * (W - 80) <= (W - x) * mid;
            if shaft || head {
                [255, 60, 60, 255]
            } else {
                CLEAR
            }
        })
    }

    /// Opaque diagonal gradient used as a backdrop
    pub fn splash(width: u32, height: u32) -> Self {
        let span = (width + height).max(1);
        Self::from_fn(width, height, |x, y| {
            let t = ((x + y) * 255 / span) as u8;
            [t, 96, 255 - t, 255]
        })
    }

    /// 200x200 sheet with a colored dot in each 100x100 quadrant
    pub fn sprite_sheet() -> Self {
        const COLORS: [[u8; 4]; 4] = [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [255, 255, 0, 255],
            [0, 0, 255, 255],
        ];
        Self::from_fn(200, 200, |x, y| {
            let quadrant = (y / 100 * 2 + x / 100) as usize;
            if in_disc(x % 100, y % 100, 50.0, 50.0, 45.0) {
                COLORS[quadrant]
            } else {
                CLEAR
            }
        })
    }

    /// One of four 64x205 walk cycle frames
    pub fn walk_frame(index: usize) -> Self {
        // Leg spread per frame, in pixels from the hip center
        const STRIDE: [u32; 4] = [4, 12, 20, 12];
        let stride = STRIDE[index % STRIDE.len()];
        Self::from_fn(64, 205, |x, y| {
            let head = in_disc(x, y, 32.0, 24.0, 20.0);
            let body = (20..44).contains(&x) && (44..130).contains(&y);
            let legs = (130..205).contains(&y) && {
                let drop = (y - 130) * stride / 75;
                x.abs_diff(32 - drop.min(28)) <= 5 || x.abs_diff(32 + drop.min(28)) <= 5
            };
            if head {
                [250, 210, 170, 255]
            } else if body {
                [30, 120, 200, 255]
            } else if legs {
                [60, 60, 60, 255]
            } else {
                CLEAR
            }
        })
    }

    /// Small soft particle in `color`
    pub fn particle(color: (u8, u8, u8)) -> Self {
        let (r, g, b) = color;
        Self::from_fn(10, 10, |x, y| {
            if in_disc(x, y, 5.0, 5.0, 5.0) {
                [r, g, b, 255]
            } else {
                CLEAR
            }
        })
    }

    /// White plus-shaped sparkle drawn over particles
    pub fn shimmer() -> Self {
        Self::from_fn(10, 10, |x, y| {
            if (x == 4 || y == 4) && x.abs_diff(4) + y.abs_diff(4) <= 4 {
                [255, 255, 255, 255]
            } else {
                CLEAR
            }
        })
    }
}
