//! Fixed-size particle pool
//!
//! Particles spawn scattered around an emitter, live for about a hundred
//! frames and are replaced in place once dead, so the pool never grows.

use rand::Rng;

/// Number of particles trailing the emitter
pub const DEFAULT_PARTICLE_COUNT: usize = 20;

/// Frames a particle lives before it is replaced
const MAX_FRAME: u32 = 100;

/// Spawn scatter: offsets are drawn from `-5..20` on each axis
const SPAWN_OFFSET: i32 = 5;
const SPAWN_SPREAD: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Red,
    Green,
    Blue,
}

impl ParticleKind {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub frame: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// New particle near the emitter at (x, y)
    pub fn spawn<R: Rng + ?Sized>(x: i32, y: i32, rng: &mut R) -> Self {
        Self {
            x: x - SPAWN_OFFSET + rng.random_range(0..SPAWN_SPREAD),
            y: y - SPAWN_OFFSET + rng.random_range(0..SPAWN_SPREAD),
            frame: rng.random_range(0..5),
            kind: ParticleKind::ALL[rng.random_range(0..ParticleKind::ALL.len())],
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.frame > MAX_FRAME
    }

    /// Shimmer overlay is drawn on even frames
    #[inline]
    pub fn shimmers(&self) -> bool {
        self.frame % 2 == 0
    }
}

pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Fill a pool of `count` particles around (x, y)
    pub fn new<R: Rng + ?Sized>(count: usize, x: i32, y: i32, rng: &mut R) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::spawn(x, y, rng)).collect(),
        }
    }

    /// Replace every dead particle with a fresh one at the emitter.
    /// Returns how many were replaced.
    pub fn respawn_dead<R: Rng + ?Sized>(&mut self, x: i32, y: i32, rng: &mut R) -> usize {
        let mut replaced = 0;
        for particle in self.particles.iter_mut().filter(|p| p.is_dead()) {
            *particle = Particle::spawn(x, y, rng);
            replaced += 1;
        }
        replaced
    }

    /// Age every particle by one frame
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.frame += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
