//! Fixed-size byte ring with a sentinel slot.
//!
//! The ring allocates `capacity + 1` slots and never fills the last free
//! one, so `head == tail` always means empty and
//! `(tail + 1) % total_slots == head` always means full. Occupancy is
//! derived from the two indices rather than tracked separately.
//!
//! The ring has no synchronization of its own; [`Queue`](crate::Queue)
//! keeps it behind a mutex.

use crate::error::{QueueError, Result};

pub(crate) struct Ring {
    storage: Vec<u8>,
    head: usize, // oldest occupied slot
    tail: usize, // one past the newest occupied slot
}

impl Ring {
    /// Allocates a ring that can hold exactly `capacity` bytes.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        let total_slots = capacity
            .checked_add(1)
            .ok_or(QueueError::CapacityOverflow { capacity })?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(total_slots)
            .map_err(|_| QueueError::AllocationFailed { capacity })?;
        storage.resize(total_slots, 0);

        Ok(Ring {
            storage,
            head: 0,
            tail: 0,
        })
    }

    fn total_slots(&self) -> usize {
        self.storage.len()
    }

    /// Usable capacity; one slot is always kept free.
    pub(crate) fn capacity(&self) -> usize {
        self.total_slots() - 1
    }

    /// Number of occupied slots between `head` and `tail`.
    pub(crate) fn len(&self) -> usize {
        let total = self.total_slots();
        (self.tail + total - self.head) % total
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[cfg(test)]
    pub(crate) fn is_full(&self) -> bool {
        (self.tail + 1) % self.total_slots() == self.head
    }

    /// Resets both indices. Stale bytes stay in storage but are unreachable.
    pub(crate) fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Copies as much of `data` as fits, oldest-first, and returns the count.
    ///
    /// Never overwrites unread bytes: once the ring is full the remainder of
    /// `data` is left behind.
    pub(crate) fn push_slice(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.capacity() - self.len());
        if n == 0 {
            return 0;
        }

        let total = self.total_slots();
        let first = n.min(total - self.tail);
        self.storage[self.tail..self.tail + first].copy_from_slice(&data[..first]);
        self.storage[..n - first].copy_from_slice(&data[first..n]);

        self.tail = (self.tail + n) % total;
        n
    }

    /// Moves up to `out.len()` bytes from the front of the ring into `out`
    /// and returns the count. Stops early once the ring drains.
    pub(crate) fn pop_into(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.len());
        if n == 0 {
            return 0;
        }

        let total = self.total_slots();
        let first = n.min(total - self.head);
        out[..first].copy_from_slice(&self.storage[self.head..self.head + first]);
        out[first..n].copy_from_slice(&self.storage[..n - first]);

        self.head = (self.head + n) % total;
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ring_is_empty() {
        let ring = Ring::with_capacity(4).unwrap();
        assert_eq!(ring.capacity(), 4);
        assert_eq!(ring.total_slots(), 5);
        assert_eq!(ring.len(), 0);
        assert!(ring.is_empty());
        assert!(!ring.is_full());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(Ring::with_capacity(0).err(), Some(QueueError::ZeroCapacity));
    }

    #[test]
    fn test_capacity_overflow_rejected() {
        assert_eq!(
            Ring::with_capacity(usize::MAX).err(),
            Some(QueueError::CapacityOverflow {
                capacity: usize::MAX
            })
        );
    }

    #[test]
    fn test_sentinel_slot_never_used() {
        let mut ring = Ring::with_capacity(4).unwrap();
        assert_eq!(ring.push_slice(&[1, 2, 3, 4, 5, 6]), 4);
        assert!(ring.is_full());
        assert_eq!(ring.len(), 4);
        assert_eq!((ring.tail + 1) % ring.total_slots(), ring.head);

        // Full ring accepts nothing
        assert_eq!(ring.push_slice(&[7]), 0);
    }

    #[test]
    fn test_push_pop_fifo() {
        let mut ring = Ring::with_capacity(8).unwrap();
        ring.push_slice(&[1, 2, 3]);
        ring.push_slice(&[4, 5]);

        let mut out = [0u8; 5];
        assert_eq!(ring.pop_into(&mut out), 5);
        assert_eq!(out, [1, 2, 3, 4, 5]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_short_read_when_draining() {
        let mut ring = Ring::with_capacity(8).unwrap();
        ring.push_slice(&[9, 8]);

        let mut out = [0u8; 6];
        assert_eq!(ring.pop_into(&mut out), 2);
        assert_eq!(&out[..2], &[9, 8]);
        assert_eq!(ring.pop_into(&mut out), 0);
    }

    #[test]
    fn test_wraparound() {
        let mut ring = Ring::with_capacity(4).unwrap();
        let mut out = [0u8; 3];

        // Move indices close to the end of storage
        assert_eq!(ring.push_slice(&[1, 2, 3]), 3);
        assert_eq!(ring.pop_into(&mut out), 3);
        assert_eq!((ring.head, ring.tail), (3, 3));

        // This write straddles the end of storage
        assert_eq!(ring.push_slice(&[10, 11, 12, 13]), 4);
        assert!(ring.is_full());
        assert_eq!(ring.len(), 4);

        let mut out = [0u8; 4];
        assert_eq!(ring.pop_into(&mut out), 4);
        assert_eq!(out, [10, 11, 12, 13]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_len_tracks_indices_across_many_cycles() {
        let mut ring = Ring::with_capacity(5).unwrap();
        let mut next = 0u8;
        let mut expected = 0u8;
        let mut out = [0u8; 3];

        for round in 0..50 {
            let chunk: Vec<u8> = (0..(round % 4 + 1))
                .map(|_| {
                    let b = next;
                    next = next.wrapping_add(1);
                    b
                })
                .collect();
            let written = ring.push_slice(&chunk);
            // Roll back bytes that did not fit so the sequence stays contiguous
            next = next.wrapping_sub((chunk.len() - written) as u8);

            let read = ring.pop_into(&mut out[..(round % 3 + 1)]);
            for &b in &out[..read] {
                assert_eq!(b, expected);
                expected = expected.wrapping_add(1);
            }
            assert!(ring.len() <= ring.capacity());
        }
    }

    #[test]
    fn test_reset() {
        let mut ring = Ring::with_capacity(4).unwrap();
        ring.push_slice(&[1, 2, 3]);
        ring.reset();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.push_slice(&[4, 5, 6, 7]), 4);
    }
}
