//! Per-pixel collision
//!
//! Each dot is approximated by a stack of horizontal strips that follow its
//! round outline. The player's dot is blocked by the screen edges and by any
//! overlap between its strips and the other dot's.

use super::{steer, Lesson, LessonContext};
use crate::collision::{rect_sets_collide, Rect};
use crate::display::PixelBuffer;
use crate::input::InputEvent;
use crate::motion::{out_of_bounds, step, Bounds, Velocity};
use crate::texture::Texture;

const DOT_SIZE: i32 = 20;
const DOT_VEL: i32 = 1;

/// (width, height) of each strip, top to bottom
const STRIPS: [(u32, u32); 11] = [
    (6, 1),
    (10, 1),
    (14, 1),
    (16, 2),
    (18, 2),
    (20, 6),
    (18, 2),
    (16, 2),
    (14, 1),
    (10, 1),
    (6, 1),
];

/// Collider strips of a dot whose top-left corner is at `pos`
pub fn colliders_at(pos: (i32, i32)) -> [Rect; 11] {
    let mut top = pos.1;
    STRIPS.map(|(w, h)| {
        let strip = Rect::new(pos.0 + (DOT_SIZE - w as i32) / 2, top, w, h);
        top += h as i32;
        strip
    })
}

pub struct PixelCollision {
    dot: Texture,
    bounds: Bounds,
    pos: (i32, i32),
    velocity: Velocity,
    other: (i32, i32),
    other_colliders: [Rect; 11],
}

impl PixelCollision {
    pub fn new(ctx: &LessonContext) -> Self {
        let other = (ctx.width_i32() / 4, ctx.height_i32() / 4);
        Self {
            dot: Texture::load_or(ctx.asset("dot.bmp"), Texture::dot),
            bounds: Bounds::new(ctx.width, ctx.height),
            pos: (0, 0),
            velocity: Velocity::default(),
            other,
            other_colliders: colliders_at(other),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }
}

impl Lesson for PixelCollision {
    fn handle_event(&mut self, event: &InputEvent) {
        steer(&mut self.velocity, event, DOT_VEL);
    }

    fn update(&mut self) {
        let bounds = self.bounds;
        let wall = &self.other_colliders;
        self.pos = step(self.pos, self.velocity, |p| {
            out_of_bounds(p, DOT_SIZE, DOT_SIZE, bounds) || rect_sets_collide(&colliders_at(p), wall)
        });
    }

    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);
        self.dot.render(buffer, self.other.0, self.other.1, None);
        self.dot.render(buffer, self.pos.0, self.pos.1, None);
    }

    fn name(&self) -> &str {
        "Per-Pixel Collision"
    }
}
