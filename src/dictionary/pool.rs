//! Free identifier queue

use std::collections::VecDeque;

/// FIFO of identifiers not bound to a live entry
#[derive(Debug, Clone)]
pub struct IdPool {
    free: VecDeque<u16>,
}

impl IdPool {
    /// Create a pool holding every id in `1..=capacity`
    pub fn new(capacity: u16) -> Self {
        Self {
            free: (1..=capacity).collect(),
        }
    }

    /// Take the next free id
    pub fn pop(&mut self) -> Option<u16> {
        self.free.pop_front()
    }

    /// Return an id to the back of the queue
    pub fn release(&mut self, id: u16) {
        self.free.push_back(id);
    }

    /// Number of free ids
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True when no id is free
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Check whether `id` is currently free
    pub fn contains(&self, id: u16) -> bool {
        self.free.contains(&id)
    }

    /// Iterate over the free ids in the order they will be handed out
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.free.iter().copied()
    }
}
