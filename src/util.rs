//! Frame timing

use std::collections::VecDeque;
use std::time::Instant;

/// Frame rate averaged over a rolling window of frames
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
    frames: u64,
}

impl FpsCounter {
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
            frames: 0,
        }
    }

    /// Record the end of a frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.record((now - self.last_frame).as_secs_f32());
        self.last_frame = now;
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
        self.frames += 1;
    }

    /// Frames recorded since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    pub fn avg_fps(&self) -> f32 {
        let ms = self.avg_frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}
