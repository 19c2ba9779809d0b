//! Common types and constants for the dictpack codec
//!
//! This module defines the core types, constants, and structures shared by
//! the encoder and the decoder: the error taxonomy, the dictionary
//! configuration, the symbol model and pass statistics.

use std::fmt;
use thiserror::Error;

/// Shortest substring the dictionary tracks
pub const MIN_KEY_LEN: usize = 3;

/// Longest substring the dictionary tracks
pub const MAX_KEY_LEN: usize = 5;

/// Number of identifiers available to the dictionary (ids `1..=65535`)
pub const MAX_CAPACITY: u16 = u16::MAX;

/// Default number of low-frequency entries a cull aims to reclaim
pub const DEFAULT_CULL_TARGET: usize = 8000;

/// Payload bits of a literal symbol
pub const LITERAL_BITS: u64 = 8;

/// Payload bits of a reference symbol
pub const REFERENCE_BITS: u64 = 16;

/// Which half of the codec raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Compression pass
    Encode,
    /// Decompression pass
    Decode,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Encode => f.write_str("encode"),
            Phase::Decode => f.write_str("decode"),
        }
    }
}

/// Error type for dictpack operations
#[derive(Debug, Error)]
pub enum DictPackError {
    /// A bit group width outside the supported set
    #[error("Invalid bit width: {0} (expected 1, 8, 9, 16 or 17)")]
    InvalidWidth(u8),

    /// The bit cursor ran past the available input
    #[error("decode: out of data at byte {byte}, bit {bit} (needed {requested} more bits)")]
    OutOfData {
        /// Byte offset of the cursor when the read was attempted
        byte: usize,
        /// Bit offset within that byte
        bit: u8,
        /// Number of bits the read asked for
        requested: u8,
    },

    /// Eviction could not release a single identifier
    #[error("{phase}: identifier pool exhausted and no dictionary entry can be evicted")]
    PoolExhaustedWithNoEvictable {
        /// Pass in which the dictionary ran dry
        phase: Phase,
    },

    /// A reference symbol named an identifier that is not live
    #[error("decode: unknown dictionary reference {id} at bit {bit_offset}")]
    UnknownReference {
        /// The offending identifier
        id: u16,
        /// Bit offset of the reference payload
        bit_offset: u64,
    },

    /// The decoded output does not have the length recorded in the frame
    #[error("decode: length mismatch, expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Length recorded at encode time
        expected: u64,
        /// Length actually produced
        actual: u64,
    },

    /// Malformed container header or stream parameters
    #[error("decode: invalid frame: {0}")]
    InvalidFrame(String),

    /// Invalid dictionary configuration handed to an encoder
    #[error("encode: invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictPackError {
    /// Re-label a configuration error found while reading a stream
    pub(crate) fn into_frame_error(self) -> Self {
        match self {
            DictPackError::InvalidConfig(reason) => DictPackError::InvalidFrame(reason),
            other => other,
        }
    }
}

/// Result type alias for dictpack operations
pub type Result<T> = std::result::Result<T, DictPackError>;

/// Tunables of the adaptive dictionary
///
/// Encoder and decoder must agree on these; the frame header carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Number of identifiers in the pool
    pub capacity: u16,
    /// Number of entries a cull tries to reclaim
    pub cull_target: usize,
}

impl DictionaryConfig {
    /// Create a validated configuration
    pub fn new(capacity: u16, cull_target: usize) -> Result<Self> {
        let config = Self {
            capacity,
            cull_target,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a dictionary
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(DictPackError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.cull_target == 0 {
            return Err(DictPackError::InvalidConfig(
                "cull target must be at least 1".to_string(),
            ));
        }
        if self.cull_target > u32::MAX as usize {
            return Err(DictPackError::InvalidConfig(format!(
                "cull target {} does not fit in 32 bits",
                self.cull_target
            )));
        }
        Ok(())
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_CAPACITY,
            cull_target: DEFAULT_CULL_TARGET,
        }
    }
}

/// One unit of the encoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A raw input byte (flag bit 0)
    Literal(u8),
    /// A dictionary identifier (flag bit 1)
    Reference(u16),
}

impl Symbol {
    /// Flag bit that precedes the payload on the wire
    pub fn flag(&self) -> u32 {
        match self {
            Symbol::Literal(_) => 0,
            Symbol::Reference(_) => 1,
        }
    }

    /// The packed group for this symbol: `payload << 1 | flag`
    pub fn group(&self) -> u32 {
        match self {
            Symbol::Literal(byte) => (*byte as u32) << 1,
            Symbol::Reference(id) => ((*id as u32) << 1) | 1,
        }
    }

    /// Total bits the symbol occupies on the wire
    pub fn bit_len(&self) -> u64 {
        match self {
            Symbol::Literal(_) => 1 + LITERAL_BITS,
            Symbol::Reference(_) => 1 + REFERENCE_BITS,
        }
    }
}

/// Statistics for an encode or decode pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CodecStats {
    /// Number of literal symbols encoded/decoded
    pub literal_count: usize,
    /// Number of reference symbols encoded/decoded
    pub reference_count: usize,
    /// Bytes consumed
    pub bytes_in: u64,
    /// Bytes produced
    pub bytes_out: u64,
    /// Exact number of symbol bits in the stream
    pub bit_len: u64,
    /// Number of culls performed
    pub evictions: usize,
    /// Total entries removed by culls
    pub evicted_entries: usize,
    /// Longest substring replaced by a reference
    pub longest_match: usize,
}

impl CodecStats {
    /// Output size relative to input size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.bytes_in > 0 {
            self.bytes_out as f64 / self.bytes_in as f64
        } else {
            0.0
        }
    }
}
