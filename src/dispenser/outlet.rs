//! # Outlet Pool
//!
//! Counting admission gate that bounds how many beverages are prepared at
//! once. Each outlet is one permit of a [`tokio::sync::Semaphore`]; a
//! preparation holds an [`OutletPermit`] for as long as it touches the
//! inventory and gives it back when the permit is dropped.
//!
//! Waiting for an outlet only suspends the calling task. By default the wait
//! is unbounded; [`OutletPool::acquire_within`] adds an optional timeout and
//! [`OutletPool::close`] wakes every waiter with an error.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::debug;

/// Why a wait for an outlet ended without a permit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutletWaitError {
    #[error("outlets are closed")]
    Closed,

    #[error("no outlet freed up within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug)]
pub struct OutletPool {
    semaphore: Semaphore,
    capacity: usize,
    in_use: AtomicUsize,
    peak: AtomicUsize,
}

impl OutletPool {
    /// Creates a pool with `capacity` outlets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`Semaphore::MAX_PERMITS`]; callers check
    /// it with [`validate_outlets`](crate::config::validate_outlets).
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Waits until an outlet is free.
    pub async fn acquire(&self) -> Result<OutletPermit<'_>, OutletWaitError> {
        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OutletWaitError::Closed)?;

        let in_use = self.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(in_use, Ordering::SeqCst);
        debug!(in_use, capacity = self.capacity, "Outlet acquired");

        Ok(OutletPermit {
            _permit: permit,
            in_use: &self.in_use,
        })
    }

    /// Like [`acquire`](Self::acquire), giving up after `timeout` if one is set.
    pub async fn acquire_within(
        &self,
        timeout: Option<Duration>,
    ) -> Result<OutletPermit<'_>, OutletWaitError> {
        match timeout {
            None => self.acquire().await,
            Some(limit) => tokio::time::timeout(limit, self.acquire())
                .await
                .map_err(|_| OutletWaitError::TimedOut(limit))?,
        }
    }

    /// Closes the pool. Pending and future acquisitions fail with
    /// [`OutletWaitError::Closed`]; permits already handed out stay valid.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outlets currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Outlets currently held.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::SeqCst)
    }

    /// Highest number of outlets ever held at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// A held outlet. Dropping it releases the outlet.
#[derive(Debug)]
pub struct OutletPermit<'a> {
    _permit: SemaphorePermit<'a>,
    in_use: &'a AtomicUsize,
}

impl OutletPermit<'_> {
    /// Releases the outlet explicitly.
    pub fn release(self) {}
}

impl Drop for OutletPermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit is returned, so `in_use` never
        // counts more holders than there are permits.
        let in_use = self.in_use.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(in_use, "Outlet released");
    }
}
