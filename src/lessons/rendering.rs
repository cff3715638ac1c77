//! Clip rendering and sprite sheets
//!
//! One sheet holds four sprites; each is cut out with a clip rectangle and
//! drawn into its own corner of the window.

use super::{Lesson, LessonContext};
use crate::collision::Rect;
use crate::display::PixelBuffer;
use crate::texture::Texture;

const CLIP_SIZE: u32 = 100;

pub struct Rendering {
    sheet: Texture,
    clips: [Rect; 4],
}

impl Rendering {
    pub fn new(ctx: &LessonContext) -> Self {
        let sheet = Texture::load_or(ctx.asset("dots.png"), Texture::sprite_sheet);
        let s = CLIP_SIZE as i32;
        Self {
            sheet,
            clips: [
                Rect::new(0, 0, CLIP_SIZE, CLIP_SIZE),
                Rect::new(s, 0, CLIP_SIZE, CLIP_SIZE),
                Rect::new(0, s, CLIP_SIZE, CLIP_SIZE),
                Rect::new(s, s, CLIP_SIZE, CLIP_SIZE),
            ],
        }
    }
}

impl Lesson for Rendering {
    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);

        let right = buffer.width() as i32 - CLIP_SIZE as i32;
        let bottom = buffer.height() as i32 - CLIP_SIZE as i32;
        let corners = [(0, 0), (right, 0), (0, bottom), (right, bottom)];
        for (clip, (x, y)) in self.clips.iter().zip(corners) {
            self.sheet.render(buffer, x, y, Some(*clip));
        }
    }

    fn name(&self) -> &str {
        "Clip Rendering"
    }
}
