//! Response header pool
//!
//! A bounded free list of [`ResponseHeader`] scratch slots. Each parse takes
//! one slot with [`HeaderPool::acquire`] and the guard puts it back when it
//! goes out of scope. A pool belongs to one consumer, and so to one
//! connection.

use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;

use crate::protocol::ResponseHeader;

/// Default number of slots kept by a pool
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Pool of response header scratch slots
pub struct HeaderPool {
    slots: ArrayQueue<ResponseHeader>,
}

impl HeaderPool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool keeping at most `capacity` idle slots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Take a slot, creating one if the pool is empty.
    ///
    /// The slot content is NOT cleared; it may hold the previous parse.
    pub fn acquire(&self) -> PooledHeader<'_> {
        let header = self.slots.pop().unwrap_or_default();
        PooledHeader { pool: self, header }
    }

    /// Number of idle slots.
    pub fn available(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    fn release(&self, header: ResponseHeader) {
        // A full pool drops the slot.
        let _ = self.slots.push(header);
    }
}

impl Default for HeaderPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A header slot on loan from a [`HeaderPool`]
pub struct PooledHeader<'a> {
    pool: &'a HeaderPool,
    header: ResponseHeader,
}

impl Deref for PooledHeader<'_> {
    type Target = ResponseHeader;

    fn deref(&self) -> &ResponseHeader {
        &self.header
    }
}

impl DerefMut for PooledHeader<'_> {
    fn deref_mut(&mut self) -> &mut ResponseHeader {
        &mut self.header
    }
}

impl Drop for PooledHeader<'_> {
    fn drop(&mut self) {
        self.pool.release(self.header);
    }
}
