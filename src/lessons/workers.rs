//! Named worker threads owned by a lesson
//!
//! Workers run until their loop ends or the owning lesson is closed. Closing
//! raises the stop flag and joins every thread, so no worker outlives the
//! lesson that started it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{error, info};

use crate::sync::SyncError;

/// Longest a worker goes without checking the stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Stop signal shared by a lesson and its workers
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sleep for `duration`, waking early once the flag is raised.
    /// Returns false if the worker should stop.
    pub fn nap(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_raised() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(POLL_INTERVAL));
        }
    }

    /// Retry a timed wait until it succeeds or the flag is raised.
    /// Returns `Ok(None)` when stopped.
    pub fn wait_for<T>(
        &self,
        mut attempt: impl FnMut(Duration) -> Result<T, SyncError>,
    ) -> Result<Option<T>, SyncError> {
        while !self.is_raised() {
            match attempt(POLL_INTERVAL) {
                Ok(value) => return Ok(Some(value)),
                Err(SyncError::TimedOut) => {},
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

#[derive(Default)]
pub struct Workers {
    stop: Arc<StopFlag>,
    handles: Vec<JoinHandle<()>>,
}

impl Workers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a named thread running `work`. Errors it returns are logged.
    pub fn spawn<F>(&mut self, name: &str, work: F) -> std::io::Result<()>
    where
        F: FnOnce(&str, &StopFlag) -> Result<(), SyncError> + Send + 'static,
    {
        let stop = Arc::clone(&self.stop);
        let thread_name = name.to_owned();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                info!("{thread_name} starting...");
                match work(thread_name.as_str(), stop.as_ref()) {
                    Ok(()) if stop.is_raised() => info!("{thread_name} stopped early"),
                    Ok(()) => info!("{thread_name} finished!"),
                    Err(e) => error!("{thread_name} aborted: {e}"),
                }
            })?;
        self.handles.push(handle);
        Ok(())
    }

    /// True once every worker has returned
    pub fn all_finished(&self) -> bool {
        self.handles.iter().all(JoinHandle::is_finished)
    }

    /// Raise the stop flag and wait for every worker
    pub fn join(&mut self) {
        self.stop.raise();
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_owned();
            if handle.join().is_err() {
                error!("{name} panicked");
            }
        }
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        self.join();
    }
}
