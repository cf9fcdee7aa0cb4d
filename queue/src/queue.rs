//! Thread-safe byte queue built on [`Ring`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace, warn};

use crate::config::QueueConfig;
use crate::error::{QueueError, Result};
use crate::ring::Ring;

/// A thread-safe, fixed-capacity byte FIFO.
///
/// Any number of producers and consumers may share one queue by cloning the
/// handle. All clones refer to the same storage.
///
/// # Semantics
///
/// - **Put**: Never blocks. Writes as many bytes as fit and returns the
///   count; a short write means the queue is full.
/// - **Get**: Blocks until at least one byte is available, then drains up to
///   the output length. Never returns `Ok(0)`.
/// - **Get with timeout**: Like `get`, bounded by a deadline. A zero timeout
///   is a non-blocking attempt that may return `Ok(0)`.
/// - **Destroy**: Consumes the handle. Fails with [`QueueError::Busy`] while
///   other handles are live.
///
/// # Example
///
/// ```
/// use giztoy_queue::Queue;
///
/// let q = Queue::new(4).unwrap();
/// assert_eq!(q.put(&[1, 2, 3, 4, 5]).unwrap(), 4); // short write, queue full
///
/// let mut out = [0u8; 8];
/// let n = q.get(&mut out).unwrap();
/// assert_eq!(&out[..n], &[1, 2, 3, 4]);
/// ```
pub struct Queue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    capacity: usize,
    state: Mutex<Ring>,
    data_ready: Condvar,
    // Occupancy as of the last critical section. Read without the lock by
    // `len`/`is_empty`; never used to decide whether to wait or drain.
    len_snapshot: AtomicUsize,
}

impl Clone for Queue {
    fn clone(&self) -> Self {
        Queue {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Queue {
    /// Creates a queue that holds up to `capacity` bytes.
    ///
    /// One extra slot is allocated as the full/empty sentinel.
    pub fn new(capacity: usize) -> Result<Self> {
        let ring = Ring::with_capacity(capacity).inspect_err(|err| {
            if matches!(err, QueueError::AllocationFailed { .. }) {
                warn!(capacity, "queue: storage allocation failed");
            }
        })?;
        debug!(capacity, "queue: created");

        Ok(Queue {
            inner: Arc::new(QueueInner {
                capacity,
                state: Mutex::new(ring),
                data_ready: Condvar::new(),
                len_snapshot: AtomicUsize::new(0),
            }),
        })
    }

    /// Creates a queue from a validated [`QueueConfig`].
    pub fn with_config(config: &QueueConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Returns the usable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Returns the number of queued bytes.
    ///
    /// This is a lock-free snapshot: it may already be stale when it returns.
    /// Good enough to decide whether a read is worth trying, not to decide
    /// that one will succeed.
    pub fn len(&self) -> usize {
        self.inner.len_snapshot.load(Ordering::Acquire)
    }

    /// Returns true if the queue looked empty at the last snapshot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the queue looked full at the last snapshot.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns the number of live handles sharing this queue, including this one.
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Discards all queued bytes.
    ///
    /// Storage is neither reallocated nor zeroed.
    pub fn clear(&self) {
        let mut ring = self.inner.state.lock();
        let dropped = ring.len();
        ring.reset();
        self.publish(&ring);
        debug!(dropped, "queue: cleared");
    }

    /// Writes as much of `data` as fits and returns the number of bytes
    /// written.
    ///
    /// Never blocks and never overwrites unread data. A return value smaller
    /// than `data.len()` (possibly 0) means the queue is full; retry policy
    /// is up to the caller. Waiting consumers are woken even on a short write.
    pub fn put(&self, data: &[u8]) -> Result<usize> {
        if data.is_empty() {
            return Err(QueueError::EmptyInput);
        }

        let mut ring = self.inner.state.lock();
        let written = ring.push_slice(data);
        self.publish(&ring);
        self.inner.data_ready.notify_all();

        if written < data.len() {
            trace!(
                requested = data.len(),
                written,
                "queue: short write, queue full"
            );
        }
        Ok(written)
    }

    /// Reads up to `out.len()` bytes, blocking until at least one is
    /// available.
    ///
    /// Returns the number of bytes read, which is always at least 1. There is
    /// no way to cancel this call; use [`get_with_timeout`](Self::get_with_timeout)
    /// when the wait must be bounded.
    pub fn get(&self, out: &mut [u8]) -> Result<usize> {
        if out.is_empty() {
            return Err(QueueError::EmptyOutput);
        }

        let mut ring = self.inner.state.lock();
        while ring.is_empty() {
            self.inner.data_ready.wait(&mut ring);
        }
        Ok(self.drain(&mut ring, out))
    }

    /// Reads up to `out.len()` bytes, waiting at most `timeout` for data.
    ///
    /// With `Duration::ZERO` this never waits and returns `Ok(0)` if the
    /// queue is empty. Otherwise it returns [`QueueError::Timeout`] when the
    /// deadline passes with nothing to read.
    pub fn get_with_timeout(&self, out: &mut [u8], timeout: Duration) -> Result<usize> {
        if out.is_empty() {
            return Err(QueueError::EmptyOutput);
        }

        let mut ring = self.inner.state.lock();
        if timeout.is_zero() {
            return Ok(self.drain(&mut ring, out));
        }

        // A deadline beyond what Instant can represent is an unbounded wait.
        let deadline = Instant::now().checked_add(timeout);
        while ring.is_empty() {
            match deadline {
                Some(deadline) => {
                    let result = self.inner.data_ready.wait_until(&mut ring, deadline);
                    if result.timed_out() && ring.is_empty() {
                        trace!(?timeout, "queue: timed out waiting for data");
                        return Err(QueueError::Timeout(timeout));
                    }
                }
                None => self.inner.data_ready.wait(&mut ring),
            }
        }
        Ok(self.drain(&mut ring, out))
    }

    /// Reads whatever is available right now without waiting.
    ///
    /// Same as `get_with_timeout(out, Duration::ZERO)`.
    pub fn try_get(&self, out: &mut [u8]) -> Result<usize> {
        self.get_with_timeout(out, Duration::ZERO)
    }

    /// Tears the queue down, releasing its storage.
    ///
    /// Fails with [`QueueError::Busy`] if other handles are still live; the
    /// storage is then released when the last of them is dropped. Either way
    /// this handle is consumed.
    pub fn destroy(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => {
                let ring = inner.state.into_inner();
                debug!(
                    capacity = inner.capacity,
                    discarded = ring.len(),
                    "queue: destroyed"
                );
                Ok(())
            }
            Err(inner) => {
                let handles = Arc::strong_count(&inner).saturating_sub(1);
                warn!(handles, "queue: destroy while other handles are live");
                Err(QueueError::Busy { handles })
            }
        }
    }

    fn drain(&self, ring: &mut Ring, out: &mut [u8]) -> usize {
        let read = ring.pop_into(out);
        self.publish(ring);
        read
    }

    fn publish(&self, ring: &Ring) {
        self.inner.len_snapshot.store(ring.len(), Ordering::Release);
    }
}
