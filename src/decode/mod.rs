//! Decompression
//!
//! [`Decoder`] turns an [`EncodedStream`] back into bytes;
//! [`DecodeReader`] wraps it behind `std::io::Read`.

mod decoder;
mod reader;

pub use decoder::Decoder;
pub use reader::DecodeReader;

use crate::frame::EncodedStream;
use crate::Result;

/// Decompress a framed buffer produced by `encode_bytes`
pub fn decode_bytes(frame: &[u8]) -> Result<Vec<u8>> {
    decode_stream(&EncodedStream::from_frame(frame)?)
}

/// Decompress an unframed stream with its side information
pub fn decode_stream(stream: &EncodedStream) -> Result<Vec<u8>> {
    Decoder::new().decode(stream)
}
