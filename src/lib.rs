//! dictpack - adaptive substring-dictionary compression
//!
//! This crate replaces repeated 3 to 5 byte substrings with 16-bit dictionary
//! references and packs the resulting literal and reference symbols into a
//! dense bit-stream. The dictionary grows from every position the encoder
//! visits and culls its least frequently used entries in bulk when the
//! 65535-id space runs out.
//!
//! # Features
//!
//! - Bit-exact wire format: 1 flag bit, then an 8-bit literal or a 16-bit id
//! - Longest-match lookup over 5, 4 and 3 byte substrings
//! - LFU-style bulk eviction with a configurable cull target
//! - Decoder replays the encoder's dictionary from the stream alone
//! - File-like API via Read/Write traits (whole buffer in memory)
//!
//! # Example
//!
//! ```
//! use dictpack::{decode_bytes, encode_bytes};
//!
//! let data = b"abracadabra abracadabra abracadabra";
//! let compressed = encode_bytes(data)?;
//! let restored = decode_bytes(&compressed)?;
//! assert_eq!(&restored[..], &data[..]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Read/Write boundary
//!
//! ```
//! use dictpack::{DecodeReader, DictionaryConfig, EncodeWriter};
//! use std::io::{Read, Write};
//!
//! let mut writer = EncodeWriter::new(Vec::new(), DictionaryConfig::default())?;
//! writer.write_all(b"Hello, World! Hello, World!")?;
//! let framed = writer.finish()?;
//!
//! let mut reader = DecodeReader::new(std::io::Cursor::new(framed))?;
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! assert_eq!(output, b"Hello, World! Hello, World!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bits;
pub mod common;
pub mod decode;
pub mod dictionary;
pub mod encode;
pub mod error;
pub mod frame;

// Re-export commonly used types
pub use bits::{BitPacker, BitUnpacker, PackWidth, UnpackWidth};
pub use common::{
    CodecStats, DictPackError, DictionaryConfig, Phase, Result, Symbol, DEFAULT_CULL_TARGET,
    MAX_CAPACITY, MAX_KEY_LEN, MIN_KEY_LEN,
};
pub use decode::{decode_stream, DecodeReader, Decoder};
pub use dictionary::{DictionaryEntry, SubstringDictionary};
pub use encode::{encode_stream, EncodeWriter, Encoder};
pub use frame::{EncodedStream, FrameHeader};

// Convenience functions

/// Compress data with the default dictionary configuration
///
/// # Arguments
/// * `data` - The data to compress
///
/// # Returns
/// A framed buffer: header followed by the packed symbol stream
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    encode::encode_bytes(data)
}

/// Compress data with an explicit dictionary configuration
///
/// # Arguments
/// * `data` - The data to compress
/// * `config` - Dictionary capacity and cull target
///
/// # Returns
/// A framed buffer: header followed by the packed symbol stream
pub fn encode_bytes_with_config(data: &[u8], config: DictionaryConfig) -> Result<Vec<u8>> {
    encode::encode_bytes_with_config(data, config)
}

/// Decompress a framed buffer
///
/// # Arguments
/// * `data` - A buffer produced by [`encode_bytes`]
///
/// # Returns
/// A vector containing the original data
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decode::decode_bytes(data)
}
