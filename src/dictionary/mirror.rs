//! Decoder-side replica of the substring dictionary
//!
//! Whenever the encoder emits a literal, every substring it tried at that
//! position was absent, so each of them took a fresh id with count 1. A
//! reference bumps the entry it names. None of this needs the substring
//! bytes, so the decoder can follow along by position alone. It records
//! where each entry starts in the output and how long it is.

use super::table::EntryTable;
use crate::{DictionaryConfig, Phase, Result};

/// Location of an entry's bytes in the decoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    /// Offset of the first byte
    pub start: usize,
    /// Number of bytes
    pub len: usize,
}

/// Id-indexed dictionary used while decoding
#[derive(Debug, Clone)]
pub struct MirrorDictionary {
    table: EntryTable<SourceSpan>,
}

impl MirrorDictionary {
    /// Create an empty dictionary
    pub fn new(config: DictionaryConfig) -> Self {
        Self {
            table: EntryTable::new(config, Phase::Decode),
        }
    }

    /// Record a new entry, culling first if the pool is empty
    pub fn insert(&mut self, span: SourceSpan) -> Result<u16> {
        Ok(self.table.insert(span)?.id)
    }

    /// Span bound to `id`, if it is live
    pub fn resolve(&self, id: u16) -> Option<SourceSpan> {
        self.table.get(id).map(|slot| slot.value)
    }

    /// Count another occurrence of a live entry
    pub fn bump(&mut self, id: u16) -> Option<u64> {
        self.table.bump(id)
    }

    /// Occurrence count of a live entry
    pub fn count(&self, id: u16) -> Option<u64> {
        self.table.get(id).map(|slot| slot.count)
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

    /// Id bookkeeping holds
    pub fn check_invariants(&self) -> bool {
        self.table.check_invariants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_allocates_like_encoder() {
        let config = DictionaryConfig::new(2, 1).unwrap();
        let mut mirror = MirrorDictionary::new(config);

        let a = mirror.insert(SourceSpan { start: 0, len: 5 }).unwrap();
        let b = mirror.insert(SourceSpan { start: 0, len: 4 }).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(mirror.bump(a), Some(2));
        assert_eq!(mirror.bump(a), Some(3));

        // Full: threshold 2 drops the count-1 entry and reuses its id
        let c = mirror.insert(SourceSpan { start: 1, len: 3 }).unwrap();
        assert_eq!(c, 2);
        assert_eq!(mirror.resolve(c), Some(SourceSpan { start: 1, len: 3 }));
        assert_eq!(mirror.count(a), Some(3));
        assert_eq!(mirror.evictions(), 1);
        assert!(mirror.check_invariants());
    }

    #[test]
    fn test_unknown_id() {
        let mirror = MirrorDictionary::new(DictionaryConfig::default());
        assert!(mirror.resolve(0).is_none());
        assert!(mirror.resolve(42).is_none());
    }
}
