//! Semaphores
//!
//! Two worker threads take turns overwriting a shared value. A binary
//! semaphore guards the read-modify-write so each thread sees the value
//! the other one left behind.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use super::workers::{StopFlag, Workers};
use super::{Lesson, LessonContext, LessonError};
use crate::collision::Rect;
use crate::display::PixelBuffer;
use crate::sync::{Semaphore, SyncError};
use crate::texture::Texture;

const THREAD_NAMES: [&str; 2] = ["Thread A", "Thread B"];

/// The shared value and who last wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    value: i32,
    writer: Option<String>,
}

struct Shared {
    lock: Semaphore,
    board: Mutex<Board>,
}

impl Shared {
    fn work(
        &self,
        name: &str,
        stop: &StopFlag,
        iterations: u32,
        rng: &mut impl Rng,
    ) -> Result<(), SyncError> {
        for _ in 0..iterations {
            if !stop.nap(Duration::from_millis(rng.random_range(16..48))) {
                return Ok(());
            }
            {
                let _permit = self.lock.access()?;
                let mut board = self.board.lock()?;
                info!("{name} gets {}", board.value);
                board.value = rng.random_range(0..256);
                board.writer = Some(name.to_owned());
                info!("{name} sets {}", board.value);
            }
            if !stop.nap(Duration::from_millis(rng.random_range(16..656))) {
                return Ok(());
            }
        }
        Ok(())
    }
}

pub struct Semaphores {
    splash: Texture,
    shared: Arc<Shared>,
    workers: Workers,
}

impl Semaphores {
    pub fn new(ctx: &LessonContext) -> Result<Self, LessonError> {
        let shared = Arc::new(Shared {
            lock: Semaphore::new(1),
            board: Mutex::new(Board {
                value: -1,
                writer: None,
            }),
        });

        let mut workers = Workers::new();
        let mut rng = rand::rng();
        // The second thread starts a moment after the first
        let delays = [0, rng.random_range(16..48)];
        for (name, delay) in THREAD_NAMES.into_iter().zip(delays) {
            let shared = Arc::clone(&shared);
            let iterations = ctx.worker_iterations;
            workers.spawn(name, move |name, stop| {
                if !stop.nap(Duration::from_millis(delay)) {
                    return Ok(());
                }
                shared.work(name, stop, iterations, &mut rand::rng())
            })?;
        }

        Ok(Self {
            splash: Texture::load_or(ctx.asset("splash.png"), || {
                Texture::splash(ctx.width, ctx.height)
            }),
            shared,
            workers,
        })
    }

    fn board(&self) -> Result<Board, SyncError> {
        Ok(self.shared.board.lock()?.clone())
    }
}

impl Lesson for Semaphores {
    fn render(&mut self, buffer: &mut PixelBuffer) {
        let (width, height) = (buffer.width(), buffer.height());
        self.splash.render_scaled(buffer, Rect::new(0, 0, width, height));

        let board = match self.board() {
            Ok(board) => board,
            Err(e) => {
                warn!("Unable to read shared value: {e}");
                return;
            },
        };

        // Value gauge along the bottom, colored by the last writer
        let track = Rect::new(20, height as i32 - 60, width.saturating_sub(40), 30);
        buffer.fill_rect(track, 255, 255, 255);
        if let Ok(value) = u32::try_from(board.value) {
            let (r, g, b) = match board.writer.as_deref() {
                Some(name) if name == THREAD_NAMES[0] => (220, 40, 40),
                Some(_) => (40, 40, 220),
                None => (128, 128, 128),
            };
            let filled = Rect::new(track.x, track.y, track.w * value / 255, track.h);
            buffer.fill_rect(filled, r, g, b);
        }
        buffer.draw_rect(track, 0, 0, 0);
    }

    fn name(&self) -> &str {
        "Semaphores"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::testing::{context, eventually};
    use std::time::Instant;

    #[test]
    fn test_both_threads_write_a_value() {
        let lesson = Semaphores::new(&context()).unwrap();
        assert!(eventually(Duration::from_secs(10), || lesson.workers.all_finished()));

        let board = lesson.board().unwrap();
        assert!((0..256).contains(&board.value));
        assert!(THREAD_NAMES.contains(&board.writer.as_deref().unwrap()));
        assert_eq!(lesson.shared.lock.available().unwrap(), 1);
    }

    #[test]
    fn test_no_iterations_leaves_initial_value() {
        let mut ctx = context();
        ctx.worker_iterations = 0;
        let lesson = Semaphores::new(&ctx).unwrap();
        assert!(eventually(Duration::from_secs(2), || lesson.workers.all_finished()));
        assert_eq!(
            lesson.board().unwrap(),
            Board {
                value: -1,
                writer: None
            }
        );
    }

    #[test]
    fn test_close_does_not_wait_for_all_rounds() {
        let mut ctx = context();
        ctx.worker_iterations = 10_000;
        let lesson = Semaphores::new(&ctx).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        let start = Instant::now();
        drop(lesson);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_gauge_shows_value_and_writer() {
        let mut ctx = context();
        ctx.worker_iterations = 0;
        let mut lesson = Semaphores::new(&ctx).unwrap();
        *lesson.shared.board.lock().unwrap() = Board {
            value: 255,
            writer: Some("Thread A".into()),
        };

        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.render(&mut buffer);
        assert_eq!(buffer.get_pixel(600, 435), Some((220, 40, 40)));

        lesson.shared.board.lock().unwrap().value = 0;
        lesson.render(&mut buffer);
        assert_eq!(buffer.get_pixel(600, 435), Some((255, 255, 255)));
    }
}
