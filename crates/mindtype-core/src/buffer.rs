//! Bounded snapshot queue between the state machine and the host.
//!
//! The ring decouples snapshot production from consumption:
//! - Fixed capacity, allocated once
//! - Drop-oldest eviction when full
//! - FIFO draining in caller-sized batches

use std::collections::VecDeque;
use std::mem::MaybeUninit;

use mindtype_types::CaretSnapshot;

/// Number of snapshots a monitor retains before evicting the oldest.
pub const RING_CAPACITY: usize = 128;

/// Ring buffer of snapshots awaiting retrieval.
#[derive(Debug)]
pub struct SnapshotRing {
    /// Queue of snapshots (oldest at front)
    entries: VecDeque<CaretSnapshot>,
    capacity: usize,
}

impl SnapshotRing {
    /// Create a ring holding at most `capacity` snapshots (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest if the ring is full.
    /// Returns true if a snapshot was evicted.
    pub fn push(&mut self, snapshot: CaretSnapshot) -> bool {
        let mut evicted = false;
        if self.entries.len() == self.capacity {
            if let Some(old) = self.entries.pop_front() {
                tracing::trace!(
                    target: "mindtype::buffer",
                    "Ring full, evicting snapshot at {}ms ({:?})",
                    old.timestamp_ms, old.primary
                );
                evicted = true;
            }
        }
        self.entries.push_back(snapshot);
        evicted
    }

    /// Remove and return up to `max_count` snapshots, oldest first.
    pub fn drain(&mut self, max_count: usize) -> Vec<CaretSnapshot> {
        let take = max_count.min(self.entries.len());
        self.entries.drain(..take).collect()
    }

    /// Drain into caller-provided storage without allocating, converting
    /// each snapshot on the way out. Slots past the returned count are left
    /// untouched.
    pub fn drain_into<T>(&mut self, out: &mut [MaybeUninit<T>]) -> usize
    where
        T: From<CaretSnapshot>,
    {
        let take = out.len().min(self.entries.len());
        for (slot, snap) in out.iter_mut().zip(self.entries.drain(..take)) {
            slot.write(T::from(snap));
        }
        take
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

}

impl Default for SnapshotRing {
    fn default() -> Self {
        Self::new(RING_CAPACITY)
    }
}
