//! Circular collision
//!
//! The player's dot has a circle collider centered on its position. It is
//! kept on screen and out of both a fixed wall and a second dot.

use super::{steer, Lesson, LessonContext};
use crate::collision::{circle_rect_collides, circles_collide, Circle, Rect};
use crate::display::PixelBuffer;
use crate::input::InputEvent;
use crate::motion::{step, Velocity};
use crate::texture::Texture;

const DOT_RADIUS: u32 = 10;
const DOT_VEL: i32 = 1;
const WALL: Rect = Rect::new(300, 40, 40, 400);

pub struct CircularCollision {
    dot: Texture,
    width: i32,
    height: i32,
    /// Center of the player's dot
    pos: (i32, i32),
    velocity: Velocity,
    other: Circle,
}

impl CircularCollision {
    pub fn new(ctx: &LessonContext) -> Self {
        let r = DOT_RADIUS as i32;
        Self {
            dot: Texture::load_or(ctx.asset("dot.bmp"), Texture::dot),
            width: ctx.width_i32(),
            height: ctx.height_i32(),
            pos: (r, r),
            velocity: Velocity::default(),
            other: Circle::new(ctx.width_i32() / 4, ctx.height_i32() / 4, DOT_RADIUS),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }

    fn blocked(&self, center: (i32, i32)) -> bool {
        let collider = Circle::new(center.0, center.1, DOT_RADIUS);
        let r = DOT_RADIUS as i32;
        center.0 - r < 0
            || center.0 + r > self.width
            || center.1 - r < 0
            || center.1 + r > self.height
            || circle_rect_collides(&collider, &WALL)
            || circles_collide(&collider, &self.other)
    }

    fn draw_dot(&self, buffer: &mut PixelBuffer, center: (i32, i32)) {
        let r = DOT_RADIUS as i32;
        self.dot.render(buffer, center.0 - r, center.1 - r, None);
    }
}

impl Lesson for CircularCollision {
    fn handle_event(&mut self, event: &InputEvent) {
        steer(&mut self.velocity, event, DOT_VEL);
    }

    fn update(&mut self) {
        self.pos = step(self.pos, self.velocity, |p| self.blocked(p));
    }

    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);
        buffer.draw_rect(WALL, 0, 0, 0);
        self.draw_dot(buffer, (self.other.x, self.other.y));
        self.draw_dot(buffer, self.pos);
    }

    fn name(&self) -> &str {
        "Circular Collision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::lessons::testing::{context, press};

    fn drive(start: (i32, i32), keys: &[Key], ticks: usize) -> (i32, i32) {
        let mut lesson = CircularCollision::new(&context());
        lesson.pos = start;
        for &key in keys {
            lesson.handle_event(&press(key));
        }
        for _ in 0..ticks {
            lesson.update();
        }
        lesson.position()
    }

    #[test]
    fn test_starts_in_the_corner() {
        let lesson = CircularCollision::new(&context());
        assert_eq!(lesson.position(), (10, 10));
        assert_eq!(lesson.other, Circle::new(160, 120, 10));
    }

    #[test]
    fn test_wall_stops_the_dot() {
        // Touching the wall's left edge at x = 300 is allowed
        assert_eq!(drive((280, 100), &[Key::Right], 30), (290, 100));
        // Sliding down along the wall still works
        assert_eq!(drive((290, 100), &[Key::Right, Key::Down], 20), (290, 120));
    }

    #[test]
    fn test_other_dot_stops_the_dot() {
        assert_eq!(drive((100, 120), &[Key::Right], 60), (140, 120));
        assert_eq!(drive((160, 60), &[Key::Down], 60), (160, 100));
    }

    #[test]
    fn test_screen_edges() {
        assert_eq!(drive((10, 10), &[Key::Left, Key::Up], 5), (10, 10));
        assert_eq!(drive((600, 440), &[Key::Right, Key::Down], 100), (630, 470));
    }

    #[test]
    fn test_render_draws_wall_outline() {
        let mut lesson = CircularCollision::new(&context());
        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.render(&mut buffer);
        assert_eq!(buffer.get_pixel(300, 200), Some((0, 0, 0)));
        assert_eq!(buffer.get_pixel(320, 200), Some((255, 255, 255)));
    }
}
