//! Thread hand-off primitives used by the worker lessons

mod semaphore;
mod slot;

pub use semaphore::{Semaphore, SemaphoreGuard};
pub use slot::SlotChannel;

use std::sync::PoisonError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A thread panicked while holding the lock. The shared state can no
    /// longer be trusted and the workflow using it must stop.
    #[error("lock poisoned by a panicking thread")]
    Poisoned,
    #[error("timed out waiting for the slot")]
    TimedOut,
}

impl<T> From<PoisonError<T>> for SyncError {
    fn from(_: PoisonError<T>) -> Self {
        SyncError::Poisoned
    }
}
