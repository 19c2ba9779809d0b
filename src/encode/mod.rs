//! Compression
//!
//! [`Encoder`] turns a byte buffer into an [`EncodedStream`];
//! [`EncodeWriter`] wraps it behind `std::io::Write`.

mod encoder;
mod writer;

pub use encoder::Encoder;
pub use writer::EncodeWriter;

use crate::frame::EncodedStream;
use crate::{DictionaryConfig, Result};

/// Compress `data` with the default dictionary configuration and return a
/// framed buffer
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    encode_bytes_with_config(data, DictionaryConfig::default())
}

/// Compress `data` with an explicit dictionary configuration and return a
/// framed buffer
pub fn encode_bytes_with_config(data: &[u8], config: DictionaryConfig) -> Result<Vec<u8>> {
    Ok(encode_stream(data, config)?.to_frame())
}

/// Compress `data` into an unframed stream plus side information
pub fn encode_stream(data: &[u8], config: DictionaryConfig) -> Result<EncodedStream> {
    Encoder::new(config)?.encode(data)
}
