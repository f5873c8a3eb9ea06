//! Label registry for name compression.
//!
//! The registry is the bidirectional map both codec directions use to track
//! where label suffixes sit in a packet. Keys are the dotted, lowercased
//! form of one or more consecutive labels from the tail of a name; offsets
//! are header-inclusive byte positions (≥ 12 on encode). Registration is
//! first-write-wins so pointers stay monotone and never reference forward.

use compact_str::CompactString;
use hashbrown::HashMap;

/// Offsets at or above this cannot be expressed in a 14-bit pointer.
pub const COMPRESSION_POINTER_LIMIT: usize = 0x4000;

/// Bidirectional map between label suffixes and packet offsets.
///
/// One registry serves exactly one packet; reusing it across packets
/// produces meaningless pointers.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    /// Suffix → first offset it was observed at.
    by_suffix: HashMap<CompactString, usize>,
    /// Offset → suffix first observed there.
    by_offset: HashMap<usize, CompactString>,
}

impl LabelRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a suffix at an offset. Idempotent: the earliest offset for a
    /// suffix wins, and the earliest suffix for an offset wins.
    pub fn register(&mut self, suffix: CompactString, offset: usize) {
        if let hashbrown::hash_map::Entry::Vacant(entry) = self.by_suffix.entry(suffix.clone()) {
            entry.insert(offset);
            self.by_offset.entry(offset).or_insert(suffix);
        }
    }

    /// Returns the earliest offset registered for a suffix, if that offset
    /// is expressible as a 14-bit pointer.
    ///
    /// Offsets at or past [`COMPRESSION_POINTER_LIMIT`] are treated as
    /// misses; returning them would produce illegal pointers.
    pub fn lookup_index(&self, suffix: &str) -> Option<usize> {
        self.by_suffix
            .get(suffix)
            .copied()
            .filter(|&offset| offset < COMPRESSION_POINTER_LIMIT)
    }

    /// Returns the suffix first observed at an offset.
    ///
    /// Reverse lookups only feed trace output; correctness never depends
    /// on them.
    pub fn lookup_suffix(&self, offset: usize) -> Option<&str> {
        self.by_offset.get(&offset).map(CompactString::as_str)
    }

    /// Returns the number of registered suffixes.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_suffix.len()
    }

    /// Returns true if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_suffix.is_empty()
    }
}
