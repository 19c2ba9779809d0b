//! Adaptive substring dictionary
//!
//! Maps observed 3 to 5 byte substrings to 16-bit identifiers with per-entry
//! occurrence counts. When the identifier pool runs dry, a cull removes the
//! least frequently seen entries in bulk.
//!
//! The encoder uses [`SubstringDictionary`], which indexes entries by content.
//! The decoder uses [`MirrorDictionary`], which replays the same allocation,
//! counting and eviction but stores where each entry's bytes sit in the
//! decoded output instead of the bytes themselves.

mod mirror;
mod pool;
mod substring;
mod table;

pub use mirror::{MirrorDictionary, SourceSpan};
pub use pool::IdPool;
pub use substring::Substring;
pub use table::{EntryTable, Insertion, Slot};

use crate::common::{MAX_KEY_LEN, MIN_KEY_LEN};
use crate::{DictionaryConfig, Phase, Result};
use std::collections::HashMap;

/// A live dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// The substring's bytes
    pub substring: Substring,
    /// Identifier bound to it
    pub id: u16,
    /// Occurrence count
    pub count: u64,
}

/// A successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryMatch {
    /// Identifier of the matched entry
    pub id: u16,
    /// Number of bytes matched
    pub len: usize,
}

/// Content-indexed dictionary used while encoding
#[derive(Debug, Clone)]
pub struct SubstringDictionary {
    table: EntryTable<Substring>,
    index: HashMap<Substring, u16>,
}

impl SubstringDictionary {
    /// Create an empty dictionary
    pub fn new(config: DictionaryConfig) -> Self {
        Self {
            table: EntryTable::new(config, Phase::Encode),
            index: HashMap::new(),
        }
    }

    /// Find the longest entry matching `window[pos..]`.
    ///
    /// Lengths are tried from 5 down to 3; lengths that would run past the
    /// end of the window are skipped.
    pub fn lookup(&self, window: &[u8], pos: usize) -> Option<DictionaryMatch> {
        (MIN_KEY_LEN..=MAX_KEY_LEN).rev().find_map(|len| {
            let key = Substring::at(window, pos, len)?;
            self.index
                .get(&key)
                .map(|&id| DictionaryMatch { id, len })
        })
    }

    /// Count another occurrence of `substring`, adding it if it is new.
    ///
    /// Returns the entry's id. Adding to a full dictionary culls first.
    pub fn insert_or_bump(&mut self, substring: Substring) -> Result<u16> {
        if let Some(&id) = self.index.get(&substring) {
            self.table.bump(id);
            return Ok(id);
        }

        let insertion = self.table.insert(substring)?;
        self.forget(&insertion.evicted);
        self.index.insert(substring, insertion.id);
        Ok(insertion.id)
    }

    /// Count another occurrence of a live entry
    pub fn bump(&mut self, id: u16) -> Option<u64> {
        self.table.bump(id)
    }

    /// Cull low-frequency entries, returning how many were removed
    pub fn evict(&mut self) -> Result<usize> {
        let evicted = self.table.evict()?;
        self.forget(&evicted);
        Ok(evicted.len())
    }

    fn forget(&mut self, evicted: &[(u16, Substring)]) {
        for (_, substring) in evicted {
            self.index.remove(substring);
        }
    }

    /// Look up a live entry by id
    pub fn entry(&self, id: u16) -> Option<DictionaryEntry> {
        self.table.get(id).map(|slot| DictionaryEntry {
            substring: slot.value,
            id,
            count: slot.count,
        })
    }

    /// Occurrence count of a live entry
    pub fn count(&self, id: u16) -> Option<u64> {
        self.table.get(id).map(|slot| slot.count)
    }

    /// Look up a live entry by content
    pub fn find(&self, bytes: &[u8]) -> Option<DictionaryEntry> {
        let id = *self.index.get(&Substring::new(bytes)?)?;
        self.entry(id)
    }

    /// Live entries in ascending id order
    pub fn entries(&self) -> impl Iterator<Item = DictionaryEntry> + '_ {
        self.table.iter().map(|(id, slot)| DictionaryEntry {
            substring: slot.value,
            id,
            count: slot.count,
        })
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no entry is live
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of free ids
    pub fn free_ids(&self) -> usize {
        self.table.free_ids()
    }

    /// Culls performed so far
    pub fn evictions(&self) -> usize {
        self.table.evictions()
    }

    /// Entries removed by culls so far
    pub fn evicted_entries(&self) -> usize {
        self.table.evicted_entries()
    }

    /// Id bookkeeping holds and the content index agrees with the table
    pub fn check_invariants(&self) -> bool {
        self.table.check_invariants()
            && self.index.len() == self.table.len()
            && self
                .index
                .iter()
                .all(|(key, &id)| self.table.get(id).is_some_and(|slot| slot.value == *key))
    }
}
