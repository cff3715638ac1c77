//! Texture streaming
//!
//! A walk cycle is played by copying raw frame pixels into a single
//! streaming texture, the way video or camera frames would arrive.

use log::warn;

use super::{Lesson, LessonContext, LessonError};
use crate::display::PixelBuffer;
use crate::texture::{Texture, TextureError};

const WALK_FRAMES: usize = 4;

/// Ticks each frame is held for
const FRAME_DELAY: u32 = 4;

/// Picks which frame of a looping animation to show on each tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCycle {
    frames: usize,
    delay: u32,
    current: usize,
}

impl FrameCycle {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            delay: FRAME_DELAY,
            current: 0,
        }
    }

    /// Count down one tick and return the frame to show
    pub fn advance(&mut self) -> usize {
        self.delay -= 1;
        if self.delay == 0 {
            self.current += 1;
            self.delay = FRAME_DELAY;
        }
        if self.current >= self.frames {
            self.current = 0;
        }
        self.current
    }
}

pub struct Streaming {
    frames: Vec<Texture>,
    cycle: FrameCycle,
    streamed: Texture,
}

impl Streaming {
    pub fn new(ctx: &LessonContext) -> Result<Self, LessonError> {
        let frames = (0..WALK_FRAMES)
            .map(|i| {
                let path = ctx.asset(&format!("foo_walk_{i}.png"));
                Texture::load_or(path, || Texture::walk_frame(i))
            })
            .collect();
        Self::from_frames(frames)
    }

    /// Stream `frames` in order. Every frame must match the first one's size.
    pub fn from_frames(frames: Vec<Texture>) -> Result<Self, LessonError> {
        let Some(first) = frames.first() else {
            return Err(LessonError::NoFrames);
        };
        let (width, height) = (first.width(), first.height());
        if let Some(odd) = frames
            .iter()
            .find(|f| (f.width(), f.height()) != (width, height))
        {
            return Err(TextureError::Dimensions {
                width,
                height,
                actual_width: odd.width(),
                actual_height: odd.height(),
            }
            .into());
        }

        let mut streamed = Texture::new(width, height);
        streamed.copy_pixels(first.as_bytes())?;
        Ok(Self {
            cycle: FrameCycle::new(frames.len()),
            frames,
            streamed,
        })
    }
}

impl Lesson for Streaming {
    fn update(&mut self) {
        let frame = &self.frames[self.cycle.advance()];
        if let Err(e) = self.streamed.copy_pixels(frame.as_bytes()) {
            warn!("Dropped a streamed frame: {e}");
        }
    }

    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);
        let x = (buffer.width() as i32 - self.streamed.width() as i32) / 2;
        let y = (buffer.height() as i32 - self.streamed.height() as i32) / 2;
        self.streamed.render(buffer, x, y, None);
    }

    fn name(&self) -> &str {
        "Texture Streaming"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::testing::context;

    #[test]
    fn test_frame_cycle_holds_each_frame() {
        let mut cycle = FrameCycle::new(4);
        let shown: Vec<usize> = (0..17).map(|_| cycle.advance()).collect();
        assert_eq!(
            shown,
            [0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 0, 0]
        );
    }

    #[test]
    fn test_single_frame_never_moves() {
        let mut cycle = FrameCycle::new(1);
        assert!((0..20).all(|_| cycle.advance() == 0));
    }

    #[test]
    fn test_update_copies_the_current_frame() {
        let mut lesson = Streaming::new(&context()).unwrap();
        assert_eq!(lesson.streamed.as_bytes(), lesson.frames[0].as_bytes());
        for _ in 0..3 {
            lesson.update();
        }
        assert_eq!(lesson.streamed.as_bytes(), lesson.frames[0].as_bytes());
        lesson.update();
        assert_eq!(lesson.streamed.as_bytes(), lesson.frames[1].as_bytes());
        for _ in 0..4 {
            lesson.update();
        }
        assert_eq!(lesson.streamed.as_bytes(), lesson.frames[2].as_bytes());
    }

    #[test]
    fn test_mismatched_frames_are_rejected() {
        let frames = vec![Texture::new(64, 205), Texture::new(205, 64)];
        assert!(matches!(
            Streaming::from_frames(frames),
            Err(LessonError::Texture(TextureError::Dimensions {
                actual_width: 205,
                ..
            }))
        ));
        assert!(matches!(
            Streaming::from_frames(Vec::new()),
            Err(LessonError::NoFrames)
        ));
    }

    #[test]
    fn test_frame_is_centered() {
        let mut lesson = Streaming::new(&context()).unwrap();
        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.render(&mut buffer);
        // Stand-in frames have the body at x 20..44, y 44..130
        assert_ne!(buffer.get_pixel(288 + 32, 137 + 80), Some((255, 255, 255)));
        assert_eq!(buffer.get_pixel(10, 10), Some((255, 255, 255)));
    }
}
