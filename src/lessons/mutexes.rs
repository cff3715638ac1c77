//! Mutexes and conditions
//!
//! A producer and a consumer hand random values across a single-slot
//! channel. Whichever side gets ahead waits on the channel's condition
//! until the other side catches up.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use super::workers::{StopFlag, Workers};
use super::{Lesson, LessonContext, LessonError};
use crate::collision::Rect;
use crate::display::PixelBuffer;
use crate::sync::{SlotChannel, SyncError};
use crate::texture::Texture;

const BAR_WIDTH: u32 = 24;
const BAR_GAP: i32 = 8;

/// Values seen on each side of the channel, in order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Tally {
    produced: Vec<i32>,
    consumed: Vec<i32>,
}

#[derive(Default)]
struct Shared {
    slot: SlotChannel<i32>,
    tally: Mutex<Tally>,
}

impl Shared {
    fn produce(
        &self,
        stop: &StopFlag,
        iterations: u32,
        rng: &mut impl Rng,
    ) -> Result<(), SyncError> {
        for _ in 0..iterations {
            if !stop.nap(Duration::from_millis(rng.random_range(0..1000))) {
                return Ok(());
            }
            let value = rng.random_range(0..255);
            if self.slot.is_full()? {
                info!("Producer encountered full buffer, waiting for consumer to empty buffer...");
            }
            if stop.wait_for(|timeout| self.slot.put_timeout(value, timeout))?.is_none() {
                return Ok(());
            }
            info!("Produced {value}");
            self.tally.lock()?.produced.push(value);
        }
        Ok(())
    }

    fn consume(
        &self,
        stop: &StopFlag,
        iterations: u32,
        rng: &mut impl Rng,
    ) -> Result<(), SyncError> {
        for _ in 0..iterations {
            if !stop.nap(Duration::from_millis(rng.random_range(0..1000))) {
                return Ok(());
            }
            if !self.slot.is_full()? {
                info!("Consumer encountered empty buffer, waiting for producer to fill buffer...");
            }
            let Some(value) = stop.wait_for(|timeout| self.slot.take_timeout(timeout))? else {
                return Ok(());
            };
            info!("Consumed {value}");
            self.tally.lock()?.consumed.push(value);
        }
        Ok(())
    }
}

pub struct Mutexes {
    splash: Texture,
    shared: Arc<Shared>,
    workers: Workers,
}

impl Mutexes {
    pub fn new(ctx: &LessonContext) -> Result<Self, LessonError> {
        let shared = Arc::new(Shared::default());
        let iterations = ctx.worker_iterations;

        let mut workers = Workers::new();
        let producer = Arc::clone(&shared);
        workers.spawn("Producer", move |_, stop| {
            producer.produce(stop, iterations, &mut rand::rng())
        })?;
        let consumer = Arc::clone(&shared);
        workers.spawn("Consumer", move |_, stop| {
            consumer.consume(stop, iterations, &mut rand::rng())
        })?;

        Ok(Self {
            splash: Texture::load_or(ctx.asset("splash.png"), || {
                Texture::splash(ctx.width, ctx.height)
            }),
            shared,
            workers,
        })
    }

    fn tally(&self) -> Result<Tally, SyncError> {
        Ok(self.shared.tally.lock()?.clone())
    }
}

/// One bar per value, left to right from `x`, growing up from `baseline`
fn draw_bars(
    buffer: &mut PixelBuffer,
    values: &[i32],
    x: i32,
    baseline: i32,
    color: (u8, u8, u8),
) {
    let (r, g, b) = color;
    let step = BAR_WIDTH as i32 + BAR_GAP;
    for (i, &value) in values.iter().enumerate() {
        let height = value.clamp(0, 255) as u32 / 2 + 1;
        let left = x + i as i32 * step;
        let bar = Rect::new(left, baseline - height as i32, BAR_WIDTH, height);
        buffer.fill_rect(bar, r, g, b);
    }
}

impl Lesson for Mutexes {
    fn render(&mut self, buffer: &mut PixelBuffer) {
        let (width, height) = (buffer.width(), buffer.height());
        self.splash.render_scaled(buffer, Rect::new(0, 0, width, height));

        // Slot box in the top left: filled while a value is waiting
        let slot = Rect::new(20, 20, 40, 40);
        match self.shared.slot.is_full() {
            Ok(true) => buffer.fill_rect(slot, 40, 200, 40),
            Ok(false) => buffer.fill_rect(slot, 255, 255, 255),
            Err(e) => warn!("Unable to read slot: {e}"),
        }
        buffer.draw_rect(slot, 0, 0, 0);

        match self.tally() {
            Ok(tally) => {
                let mid = height as i32 / 2;
                draw_bars(buffer, &tally.produced, 20, mid, (220, 120, 40));
                draw_bars(buffer, &tally.consumed, 20, height as i32 - 20, (40, 80, 220));
            },
            Err(e) => warn!("Unable to read history: {e}"),
        }
    }

    fn name(&self) -> &str {
        "Mutexes and Conditions"
    }
}
