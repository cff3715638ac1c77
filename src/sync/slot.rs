//! Bounded single-slot channel
//!
//! One value at a time moves from a producer to a consumer. `put` blocks
//! while the slot is full and `take` blocks while it is empty, so values are
//! handed over in strict alternation.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

use super::SyncError;

/// A one-item blocking buffer shared between producer and consumer threads.
///
/// Occupancy is tracked by the `Option`, so any `T` (including negative
/// integers) is a valid payload. Waits re-check the slot after every wake,
/// which keeps the channel correct with several producers or consumers and
/// under spurious wakeups.
///
/// Share it through an `Arc` created before the workers are spawned; the
/// last owner to drop it (normally after joining the workers) frees it.
#[derive(Debug)]
pub struct SlotChannel<T> {
    slot: Mutex<Option<T>>,
    /// Signalled when the slot becomes empty
    can_produce: Condvar,
    /// Signalled when the slot becomes full
    can_consume: Condvar,
}

impl<T> SlotChannel<T> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            can_produce: Condvar::new(),
            can_consume: Condvar::new(),
        }
    }

    /// Store `value`, waiting for the consumer to empty the slot first.
    pub fn put(&self, value: T) -> Result<(), SyncError> {
        let mut guard = self.slot.lock()?;
        while guard.is_some() {
            guard = self.can_produce.wait(guard)?;
        }
        *guard = Some(value);
        drop(guard);

        self.can_consume.notify_one();
        Ok(())
    }

    /// Remove the stored value, waiting for the producer to fill the slot first.
    pub fn take(&self) -> Result<T, SyncError> {
        let mut guard = self.slot.lock()?;
        let value = loop {
            if let Some(value) = guard.take() {
                break value;
            }
            guard = self.can_consume.wait(guard)?;
        };
        drop(guard);

        self.can_produce.notify_one();
        Ok(value)
    }

    /// Like `put`, but gives up after `timeout`.
    ///
    /// On `SyncError::TimedOut` the slot is untouched and `value` is dropped.
    pub fn put_timeout(&self, value: T, timeout: Duration) -> Result<(), SyncError> {
        {
            let guard = self.slot.lock()?;
            let (mut guard, _) =
                self.can_produce
                    .wait_timeout_while(guard, timeout, |slot| slot.is_some())?;
            if guard.is_some() {
                return Err(SyncError::TimedOut);
            }
            *guard = Some(value);
        }
        self.can_consume.notify_one();
        Ok(())
    }

    /// Like `take`, but gives up after `timeout`, leaving the slot empty.
    pub fn take_timeout(&self, timeout: Duration) -> Result<T, SyncError> {
        let value = {
            let guard = self.slot.lock()?;
            let (mut guard, _) =
                self.can_consume
                    .wait_timeout_while(guard, timeout, |slot| slot.is_none())?;
            guard.take().ok_or(SyncError::TimedOut)?
        };
        self.can_produce.notify_one();
        Ok(value)
    }

    /// Snapshot of the slot state. Stale as soon as it returns.
    pub fn is_full(&self) -> Result<bool, SyncError> {
        Ok(self.slot.lock()?.is_some())
    }
}

impl<T> Default for SlotChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}
