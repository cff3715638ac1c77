//! Optimized surface loading and soft stretching
//!
//! A single image is stretched over the whole window every frame.

use super::{Lesson, LessonContext};
use crate::collision::Rect;
use crate::display::PixelBuffer;
use crate::texture::Texture;

pub struct Stretch {
    image: Texture,
}

impl Stretch {
    pub fn new(ctx: &LessonContext) -> Self {
        // A small stand-in makes the stretching visible
        let image = Texture::load_or(ctx.asset("stretch.bmp"), || Texture::splash(64, 48));
        Self { image }
    }
}

impl Lesson for Stretch {
    fn render(&mut self, buffer: &mut PixelBuffer) {
        let screen = Rect::new(0, 0, buffer.width(), buffer.height());
        self.image.render_scaled(buffer, screen);
    }

    fn name(&self) -> &str {
        "Stretched Surface"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::testing::context;

    #[test]
    fn test_image_covers_the_window() {
        let mut lesson = Stretch::new(&context());
        let mut buffer = PixelBuffer::with_size(640, 480);
        buffer.clear(1, 2, 3);
        lesson.render(&mut buffer);

        let corner = |x, y| lesson.image.pixel(x, y).map(|[r, g, b, _]| (r, g, b));
        let (w, h) = (lesson.image.width(), lesson.image.height());
        assert_eq!(buffer.get_pixel(0, 0), corner(0, 0));
        assert_eq!(buffer.get_pixel(639, 479), corner(w - 1, h - 1));
    }
}
