//! Frame (container) for encoded streams
//!
//! The core bit-stream carries no length, so a fixed header travels with it.
//! The header holds the side information the decoder needs: the original
//! length, the exact symbol bit count and the dictionary configuration.
//!
//! Layout (little-endian):
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 8    | source length |
//! | 8      | 8    | bit length    |
//! | 16     | 2    | capacity      |
//! | 18     | 4    | cull target   |
//! | 22     | 4    | reserved (0)  |
//! | 26     | ..   | stream bytes  |

use crate::{DictPackError, DictionaryConfig, Result};

/// Size of the serialized header in bytes
pub const FRAME_HEADER_LEN: usize = 26;

/// Parsed frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of bytes the stream decodes to
    pub source_len: u64,
    /// Number of meaningful bits in the stream, excluding padding
    pub bit_len: u64,
    /// Dictionary configuration used by the encoder
    pub config: DictionaryConfig,
}

impl FrameHeader {
    /// Number of stream bytes that follow the header
    pub fn stream_len(&self) -> u64 {
        self.bit_len.div_ceil(8)
    }

    /// Zero bits appended after the last symbol
    pub fn padding_bits(&self) -> u8 {
        ((8 - self.bit_len % 8) % 8) as u8
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_LEN] {
        let mut out = [0u8; FRAME_HEADER_LEN];
        out[0..8].copy_from_slice(&self.source_len.to_le_bytes());
        out[8..16].copy_from_slice(&self.bit_len.to_le_bytes());
        out[16..18].copy_from_slice(&self.config.capacity.to_le_bytes());
        out[18..22].copy_from_slice(&(self.config.cull_target as u32).to_le_bytes());
        out
    }

    /// Parse and validate a header from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FRAME_HEADER_LEN {
            return Err(DictPackError::InvalidFrame(format!(
                "header needs {FRAME_HEADER_LEN} bytes, got {}",
                data.len()
            )));
        }

        let source_len = read_u64(&data[0..8]);
        let bit_len = read_u64(&data[8..16]);
        let capacity = u16::from_le_bytes([data[16], data[17]]);
        let cull_target = u32::from_le_bytes([data[18], data[19], data[20], data[21]]);
        let reserved = u32::from_le_bytes([data[22], data[23], data[24], data[25]]);

        if reserved != 0 {
            return Err(DictPackError::InvalidFrame(format!(
                "reserved field is {reserved:#x}, expected 0"
            )));
        }

        let config = DictionaryConfig::new(capacity, cull_target as usize)
            .map_err(DictPackError::into_frame_error)?;

        let header = Self {
            source_len,
            bit_len,
            config,
        };

        let stream_len = (data.len() - FRAME_HEADER_LEN) as u64;
        if stream_len != header.stream_len() {
            return Err(DictPackError::InvalidFrame(format!(
                "bit length {bit_len} needs {} stream bytes, found {stream_len}",
                header.stream_len()
            )));
        }

        Ok(header)
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// An encoded bit-stream together with its side information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    /// Packed symbols, zero-padded to a whole byte
    pub data: Vec<u8>,
    /// Number of meaningful bits in `data`
    pub bit_len: u64,
    /// Number of bytes the stream decodes to
    pub source_len: u64,
    /// Dictionary configuration used by the encoder
    pub config: DictionaryConfig,
}

impl EncodedStream {
    /// Header describing this stream
    pub fn header(&self) -> FrameHeader {
        FrameHeader {
            source_len: self.source_len,
            bit_len: self.bit_len,
            config: self.config,
        }
    }

    /// Serialize header and stream into a single buffer
    pub fn to_frame(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FRAME_HEADER_LEN + self.data.len());
        out.extend_from_slice(&self.header().to_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Parse a buffer produced by [`EncodedStream::to_frame`]
    pub fn from_frame(frame: &[u8]) -> Result<Self> {
        let header = FrameHeader::parse(frame)?;
        Ok(Self {
            data: frame[FRAME_HEADER_LEN..].to_vec(),
            bit_len: header.bit_len,
            source_len: header.source_len,
            config: header.config,
        })
    }
}
