mod circular_collision;
mod geometry;
mod joystick;
mod mutexes;
mod particles;
mod pixel_collision;
mod rendering;
mod semaphores;
mod streaming;
mod stretch;
mod workers;

pub use circular_collision::CircularCollision;
pub use geometry::Geometry;
pub use joystick::JoystickLesson;
pub use mutexes::Mutexes;
pub use particles::ParticleLesson;
pub use pixel_collision::PixelCollision;
pub use rendering::Rendering;
pub use semaphores::Semaphores;
pub use streaming::Streaming;
pub use stretch::Stretch;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::LessonsConfig;
use crate::display::PixelBuffer;
use crate::input::InputEvent;
use crate::motion::Velocity;
use crate::sync::SyncError;
use crate::texture::TextureError;

#[derive(Debug, Error)]
pub enum LessonError {
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("animation has no frames")]
    NoFrames,
    #[error("no lesson at index {0}")]
    UnknownLesson(usize),
}

/// One self-contained tutorial program
pub trait Lesson {
    /// React to a single input event
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Advance the simulation by one frame
    fn update(&mut self) {}

    /// Draw the current frame. Some lessons animate as they draw.
    fn render(&mut self, buffer: &mut PixelBuffer);

    /// Lesson name for the window title and logs
    fn name(&self) -> &str;
}

/// Everything a lesson needs to set itself up
#[derive(Debug, Clone)]
pub struct LessonContext {
    pub width: u32,
    pub height: u32,
    pub asset_dir: PathBuf,
    pub dead_zone: i16,
    pub worker_iterations: u32,
    pub particle_count: usize,
}

impl LessonContext {
    pub fn from_config(config: &LessonsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            asset_dir: config.asset_dir.clone(),
            dead_zone: config.dead_zone(),
            worker_iterations: config.worker_iterations,
            particle_count: config.particle_count,
        }
    }

    /// Path of an image inside the asset directory
    pub fn asset(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }

    fn width_i32(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    fn height_i32(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

pub type LessonBuilder = fn(&LessonContext) -> Result<Box<dyn Lesson>, LessonError>;

/// Lessons in number-key order: key 1 builds the first, key 0 the tenth
pub const LESSONS: [(&str, LessonBuilder); 10] = [
    ("Stretched Surface", |ctx| Ok(Box::new(Stretch::new(ctx)))),
    ("Geometry Rendering", |ctx| Ok(Box::new(Geometry::new(ctx)))),
    ("Clip Rendering", |ctx| Ok(Box::new(Rendering::new(ctx)))),
    ("Joystick", |ctx| Ok(Box::new(JoystickLesson::new(ctx)))),
    ("Per-Pixel Collision", |ctx| Ok(Box::new(PixelCollision::new(ctx)))),
    ("Circular Collision", |ctx| Ok(Box::new(CircularCollision::new(ctx)))),
    ("Particle Engine", |ctx| Ok(Box::new(ParticleLesson::new(ctx)))),
    ("Texture Streaming", |ctx| Ok(Box::new(Streaming::new(ctx)?))),
    ("Semaphores", |ctx| Ok(Box::new(Semaphores::new(ctx)?))),
    ("Mutexes and Conditions", |ctx| Ok(Box::new(Mutexes::new(ctx)?))),
];

/// Construct the lesson at `index`
pub fn build(index: usize, ctx: &LessonContext) -> Result<Box<dyn Lesson>, LessonError> {
    let (name, builder) = LESSONS
        .get(index)
        .ok_or(LessonError::UnknownLesson(index))?;
    log::info!("Starting lesson {}: {}", index + 1, name);
    builder(ctx)
}

/// Feed an arrow key event into a dot's velocity, ignoring key repeats
fn steer(velocity: &mut Velocity, event: &InputEvent, step: i32) {
    match *event {
        InputEvent::KeyDown { key, repeat: false } => velocity.apply_key(key, true, step),
        InputEvent::KeyUp { key, repeat: false } => velocity.apply_key(key, false, step),
        _ => {},
    }
}
