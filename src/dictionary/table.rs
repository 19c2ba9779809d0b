//! Identifier table with occurrence counts and bulk eviction
//!
//! The table knows nothing about what an entry represents. Allocation,
//! counting and eviction depend only on ids and counts, which is what lets
//! the decoder replay the encoder's dictionary without seeing substrings.

use super::pool::IdPool;
use crate::{DictPackError, DictionaryConfig, Phase, Result};

/// A live entry and how often it has been seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    /// Payload bound to the id
    pub value: T,
    /// Occurrence count, starting at 1
    pub count: u64,
}

/// Outcome of an insertion
#[derive(Debug)]
pub struct Insertion<T> {
    /// Id bound to the new entry
    pub id: u16,
    /// Entries a cull removed to make room, in ascending id order
    pub evicted: Vec<(u16, T)>,
}

/// Bounded id space with LFU-style bulk eviction
#[derive(Debug, Clone)]
pub struct EntryTable<T> {
    /// Indexed by id; slot 0 is never used
    slots: Vec<Option<Slot<T>>>,
    live: usize,
    pool: IdPool,
    config: DictionaryConfig,
    phase: Phase,
    evictions: usize,
    evicted_entries: usize,
}

impl<T> EntryTable<T> {
    /// Create an empty table whose pool holds `config.capacity` ids
    pub fn new(config: DictionaryConfig, phase: Phase) -> Self {
        let mut slots = Vec::with_capacity(config.capacity as usize + 1);
        slots.resize_with(config.capacity as usize + 1, || None);

        Self {
            slots,
            live: 0,
            pool: IdPool::new(config.capacity),
            config,
            phase,
            evictions: 0,
            evicted_entries: 0,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when no entry is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of free ids
    pub fn free_ids(&self) -> usize {
        self.pool.len()
    }

    /// The configuration the table was built with
    pub fn config(&self) -> DictionaryConfig {
        self.config
    }

    /// Culls performed so far
    pub fn evictions(&self) -> usize {
        self.evictions
    }

    /// Entries removed by culls so far
    pub fn evicted_entries(&self) -> usize {
        self.evicted_entries
    }

    /// Look up a live entry
    pub fn get(&self, id: u16) -> Option<&Slot<T>> {
        self.slots.get(id as usize)?.as_ref()
    }

    /// Increment an entry's count, returning the new count
    pub fn bump(&mut self, id: u16) -> Option<u64> {
        let slot = self.slots.get_mut(id as usize)?.as_mut()?;
        slot.count = slot.count.saturating_add(1);
        Some(slot.count)
    }

    /// Bind `value` to the next free id with count 1, culling first if the
    /// pool is empty
    pub fn insert(&mut self, value: T) -> Result<Insertion<T>> {
        let evicted = if self.pool.is_empty() {
            self.evict()?
        } else {
            Vec::new()
        };

        let id = self
            .pool
            .pop()
            .ok_or(DictPackError::PoolExhaustedWithNoEvictable { phase: self.phase })?;
        self.slots[id as usize] = Some(Slot { value, count: 1 });
        self.live += 1;

        Ok(Insertion { id, evicted })
    }

    /// Smallest threshold `t >= 1` such that at least `cull_target` live
    /// entries have `count < t`.
    ///
    /// The target is clamped to the number of live entries. Returns `None`
    /// for an empty table.
    pub fn eviction_threshold(&self) -> Option<u64> {
        let target = self.config.cull_target.min(self.live);
        if target == 0 {
            return None;
        }

        let mut counts: Vec<u64> = self.slots.iter().flatten().map(|s| s.count).collect();
        let (_, nth, _) = counts.select_nth_unstable(target - 1);
        Some(nth.saturating_add(1))
    }

    /// Remove every entry with `count <= threshold` and return their ids to
    /// the pool.
    ///
    /// The removal predicate is inclusive while the threshold search is
    /// strict, so a cull removes at least `cull_target` entries and usually
    /// more.
    pub fn evict(&mut self) -> Result<Vec<(u16, T)>> {
        let threshold = self
            .eviction_threshold()
            .ok_or(DictPackError::PoolExhaustedWithNoEvictable { phase: self.phase })?;

        let mut evicted = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|s| s.count <= threshold) {
                if let Some(removed) = slot.take() {
                    let id = index as u16;
                    self.pool.release(id);
                    evicted.push((id, removed.value));
                }
            }
        }

        self.live -= evicted.len();
        self.evictions += 1;
        self.evicted_entries += evicted.len();

        log::trace!(
            "{} cull #{}: threshold {}, removed {}, {} live",
            self.phase,
            self.evictions,
            threshold,
            evicted.len(),
            self.live
        );

        Ok(evicted)
    }

    /// Iterate over live entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Slot<T>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|s| (id as u16, s)))
    }

    /// Every id is either live or free, never both, and none is lost
    pub fn check_invariants(&self) -> bool {
        let capacity = self.config.capacity as usize;
        if self.live + self.pool.len() != capacity || self.slots[0].is_some() {
            return false;
        }

        let mut seen = vec![false; capacity + 1];
        for (id, _) in self.iter() {
            seen[id as usize] = true;
        }
        if seen.iter().filter(|&&s| s).count() != self.live {
            return false;
        }
        for id in self.pool.iter() {
            if id == 0 || seen[id as usize] {
                return false;
            }
            seen[id as usize] = true;
        }

        seen[1..].iter().all(|&s| s)
    }
}
