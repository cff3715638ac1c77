//! Geometry rendering
//!
//! Filled and outlined rectangles, a solid line and a dotted line drawn
//! with the primitive calls alone.

use super::{Lesson, LessonContext};
use crate::collision::Rect;
use crate::display::PixelBuffer;

/// Spacing of the dotted vertical line
const DOT_SPACING: usize = 4;

pub struct Geometry {
    width: i32,
    height: i32,
}

impl Geometry {
    pub fn new(ctx: &LessonContext) -> Self {
        Self {
            width: ctx.width_i32(),
            height: ctx.height_i32(),
        }
    }

    fn fill_rect(&self) -> Rect {
        let (w, h) = (self.width, self.height);
        Rect::new(w / 4, h / 4, (w / 2).unsigned_abs(), (h / 2).unsigned_abs())
    }

    fn outline_rect(&self) -> Rect {
        let (w, h) = (self.width, self.height);
        Rect::new(w / 6, h / 6, (w * 2 / 3).unsigned_abs(), (h * 2 / 3).unsigned_abs())
    }
}

impl Lesson for Geometry {
    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);

        buffer.fill_rect(self.fill_rect(), 255, 0, 0);
        buffer.draw_rect(self.outline_rect(), 0, 255, 0);
        buffer.line(0, self.height / 2, self.width, self.height / 2, 0, 0, 255);

        for y in (0..self.height).step_by(DOT_SPACING) {
            buffer.set_pixel(self.width / 2, y, 255, 255, 0);
        }
    }

    fn name(&self) -> &str {
        "Geometry Rendering"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::testing::context;

    #[test]
    fn test_primitives_land_where_expected() {
        let mut lesson = Geometry::new(&context());
        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.render(&mut buffer);

        // Background
        assert_eq!(buffer.get_pixel(5, 5), Some((255, 255, 255)));
        // Filled quad spans (160, 120) to (479, 359)
        assert_eq!(buffer.get_pixel(160, 120), Some((255, 0, 0)));
        assert_eq!(buffer.get_pixel(479, 200), Some((255, 0, 0)));
        assert_eq!(buffer.get_pixel(480, 200), Some((255, 255, 255)));
        // Outline from (106, 80), 426x320
        assert_eq!(buffer.get_pixel(106, 100), Some((0, 255, 0)));
        assert_eq!(buffer.get_pixel(531, 100), Some((0, 255, 0)));
        assert_eq!(buffer.get_pixel(120, 100), Some((255, 255, 255)));
        // Blue line across the middle, drawn over the quad
        assert_eq!(buffer.get_pixel(0, 240), Some((0, 0, 255)));
        assert_eq!(buffer.get_pixel(300, 240), Some((0, 0, 255)));
        // Dotted yellow line down the middle
        assert_eq!(buffer.get_pixel(320, 0), Some((255, 255, 0)));
        assert_eq!(buffer.get_pixel(320, 1), Some((255, 255, 255)));
        assert_eq!(buffer.get_pixel(320, 124), Some((255, 255, 0)));
        assert_eq!(buffer.get_pixel(320, 125), Some((255, 0, 0)));
    }
}
