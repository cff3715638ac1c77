//! Counting semaphore built on a mutex and condition variable

use std::sync::{Condvar, Mutex};

use super::SyncError;

/// Hands out up to `permits` concurrent accesses to a shared resource.
#[derive(Debug)]
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Take a permit, waiting until one is free.
    pub fn acquire(&self) -> Result<(), SyncError> {
        let mut permits = self.permits.lock()?;
        while *permits == 0 {
            permits = self.available.wait(permits)?;
        }
        *permits -= 1;
        Ok(())
    }

    /// Take a permit if one is free right now.
    pub fn try_acquire(&self) -> Result<bool, SyncError> {
        let mut permits = self.permits.lock()?;
        if *permits == 0 {
            return Ok(false);
        }
        *permits -= 1;
        Ok(true)
    }

    /// Give a permit back and wake one waiter.
    pub fn release(&self) -> Result<(), SyncError> {
        *self.permits.lock()? += 1;
        self.available.notify_one();
        Ok(())
    }

    /// Permits currently free. Stale as soon as it returns.
    pub fn available(&self) -> Result<usize, SyncError> {
        Ok(*self.permits.lock()?)
    }

    /// Acquire a permit that is released when the guard drops
    pub fn access(&self) -> Result<SemaphoreGuard<'_>, SyncError> {
        self.acquire()?;
        Ok(SemaphoreGuard { semaphore: self })
    }
}

/// Holds one permit of a `Semaphore` until dropped
#[derive(Debug)]
pub struct SemaphoreGuard<'a> {
    semaphore: &'a Semaphore,
}

impl Drop for SemaphoreGuard<'_> {
    fn drop(&mut self) {
        // A poisoned counter cannot take the permit back; waiters will see
        // the poison on their next lock.
        if let Err(err) = self.semaphore.release() {
            log::warn!("Semaphore permit lost: {err}");
        }
    }
}
