//! Particle engine
//!
//! A dot trails a cloud of short-lived colored particles. Particles are
//! aged as they are drawn, and dead ones are replaced at the dot's
//! current position before each draw.

use rand::rngs::ThreadRng;

use super::{steer, Lesson, LessonContext};
use crate::display::PixelBuffer;
use crate::input::InputEvent;
use crate::motion::{out_of_bounds, step, Bounds, Velocity};
use crate::particles::{ParticleKind, ParticlePool};
use crate::texture::Texture;

const DOT_SIZE: i32 = 20;
const DOT_VEL: i32 = 10;
const PARTICLE_ALPHA: u8 = 192;

fn asset_name(kind: ParticleKind) -> &'static str {
    match kind {
        ParticleKind::Red => "red.bmp",
        ParticleKind::Green => "green.bmp",
        ParticleKind::Blue => "blue.bmp",
    }
}

pub struct ParticleLesson {
    dot: Texture,
    sparks: [Texture; 3],
    shimmer: Texture,
    bounds: Bounds,
    pos: (i32, i32),
    velocity: Velocity,
    pool: ParticlePool,
    rng: ThreadRng,
}

impl ParticleLesson {
    pub fn new(ctx: &LessonContext) -> Self {
        let translucent = |mut texture: Texture| {
            texture.set_alpha(PARTICLE_ALPHA);
            texture
        };
        let sparks = ParticleKind::ALL.map(|kind| {
            translucent(Texture::load_or(ctx.asset(asset_name(kind)), || {
                Texture::particle(kind.rgb())
            }))
        });
        let shimmer = translucent(Texture::load_or(ctx.asset("shimmer.bmp"), Texture::shimmer));

        let mut rng = rand::rng();
        let pool = ParticlePool::new(ctx.particle_count, 0, 0, &mut rng);
        Self {
            dot: Texture::load_or(ctx.asset("dot.bmp"), Texture::dot),
            sparks,
            shimmer,
            bounds: Bounds::new(ctx.width, ctx.height),
            pos: (0, 0),
            velocity: Velocity::default(),
            pool,
            rng,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.pool
    }

    fn spark(&self, kind: ParticleKind) -> &Texture {
        match kind {
            ParticleKind::Red => &self.sparks[0],
            ParticleKind::Green => &self.sparks[1],
            ParticleKind::Blue => &self.sparks[2],
        }
    }
}

impl Lesson for ParticleLesson {
    fn handle_event(&mut self, event: &InputEvent) {
        steer(&mut self.velocity, event, DOT_VEL);
    }

    fn update(&mut self) {
        let bounds = self.bounds;
        self.pos = step(self.pos, self.velocity, |p| {
            out_of_bounds(p, DOT_SIZE, DOT_SIZE, bounds)
        });
    }

    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);
        self.dot.render(buffer, self.pos.0, self.pos.1, None);

        let (x, y) = self.pos;
        self.pool.respawn_dead(x, y, &mut self.rng);
        for particle in self.pool.iter() {
            self.spark(particle.kind).render(buffer, particle.x, particle.y, None);
            if particle.shimmers() {
                self.shimmer.render(buffer, particle.x, particle.y, None);
            }
        }
        self.pool.advance();
    }

    fn name(&self) -> &str {
        "Particle Engine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::lessons::testing::{context, press, release};

    #[test]
    fn test_particles_follow_the_dot() {
        let mut lesson = ParticleLesson::new(&context());
        let mut buffer = PixelBuffer::with_size(640, 480);

        lesson.handle_event(&press(Key::Right));
        for _ in 0..5 {
            lesson.update();
        }
        lesson.handle_event(&release(Key::Right));
        assert_eq!(lesson.position(), (50, 0));

        // Long enough for every starting particle to die and respawn
        for _ in 0..110 {
            lesson.render(&mut buffer);
        }
        assert_eq!(lesson.particles().len(), 20);
        assert!(lesson
            .particles()
            .iter()
            .all(|p| (45..70).contains(&p.x) && (-5..20).contains(&p.y)));
    }

    #[test]
    fn test_dot_moves_ten_pixels_and_stays_on_screen() {
        let mut lesson = ParticleLesson::new(&context());
        lesson.handle_event(&press(Key::Down));
        lesson.update();
        assert_eq!(lesson.position(), (0, 10));
        for _ in 0..100 {
            lesson.update();
        }
        assert_eq!(lesson.position(), (0, 460));
    }

    #[test]
    fn test_particles_are_translucent() {
        let mut ctx = context();
        ctx.particle_count = 1;
        let mut lesson = ParticleLesson::new(&ctx);
        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.pos = (300, 200);
        lesson.render(&mut buffer);

        let particle = *lesson.particles().iter().next().unwrap();
        let (r, g, b) = buffer.get_pixel(particle.x + 5, particle.y + 5).unwrap();
        // Blended over white: the particle's own channel stays full, the
        // others keep a quarter of the background
        let (kr, kg, kb) = particle.kind.rgb();
        for (channel, key) in [(r, kr), (g, kg), (b, kb)] {
            if key == 255 {
                assert_eq!(channel, 255);
            } else {
                assert!((50..80).contains(&channel), "channel {channel}");
            }
        }
    }
}
