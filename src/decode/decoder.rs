//! Decoder - replays the encoder's dictionary to resolve references
//!
//! A literal at output position `p` means the encoder tried, and added,
//! the 5, 4 and 3 byte substrings starting at `p`, unless fewer than 5
//! source bytes remained, in which case it tried nothing. The decoder adds
//! the same entries as spans of its own output. A reference copies its
//! span byte by byte. The span always starts before the current position,
//! so overlapping copies read bytes that already exist.

use crate::bits::BitUnpacker;
use crate::common::{MAX_KEY_LEN, MIN_KEY_LEN};
use crate::dictionary::{MirrorDictionary, SourceSpan};
use crate::frame::EncodedStream;
use crate::{CodecStats, DictPackError, Result, Symbol};

/// Decompression session
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    stats: CodecStats,
}

impl Decoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent pass
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Reconstruct the bytes `stream` was encoded from.
    ///
    /// Decoding stops exactly at `stream.bit_len`; padding after the last
    /// symbol is never read. Each call starts from an empty dictionary.
    pub fn decode(&mut self, stream: &EncodedStream) -> Result<Vec<u8>> {
        stream
            .config
            .validate()
            .map_err(DictPackError::into_frame_error)?;

        if stream.bit_len > stream.data.len() as u64 * 8 {
            return Err(DictPackError::InvalidFrame(format!(
                "bit length {} exceeds {} stream bytes",
                stream.bit_len,
                stream.data.len()
            )));
        }

        let source_len = usize::try_from(stream.source_len).map_err(|_| {
            DictPackError::InvalidFrame(format!(
                "source length {} does not fit in memory",
                stream.source_len
            ))
        })?;

        let mut unpacker = BitUnpacker::with_bit_limit(&stream.data, stream.bit_len);
        let mut dictionary = MirrorDictionary::new(stream.config);
        // Corrupt headers can claim absurd lengths, so cap the up-front reservation
        let mut output = Vec::with_capacity(source_len.min(stream.data.len() * 4));
        let mut stats = CodecStats {
            bytes_in: stream.data.len() as u64,
            bit_len: stream.bit_len,
            ..CodecStats::default()
        };

        while !unpacker.is_exhausted() {
            let symbol_offset = unpacker.bit_position();

            match unpacker.unpack_symbol()? {
                Symbol::Literal(byte) => {
                    let pos = output.len();
                    if pos + MAX_KEY_LEN <= source_len {
                        for len in (MIN_KEY_LEN..=MAX_KEY_LEN).rev() {
                            dictionary.insert(SourceSpan { start: pos, len })?;
                        }
                    }

                    output.push(byte);
                    stats.literal_count += 1;
                }
                Symbol::Reference(id) => {
                    let span = dictionary
                        .resolve(id)
                        .ok_or(DictPackError::UnknownReference {
                            id,
                            bit_offset: symbol_offset + 1,
                        })?;
                    dictionary.bump(id);

                    for offset in span.start..span.start + span.len {
                        let byte = output[offset];
                        output.push(byte);
                    }

                    stats.reference_count += 1;
                    stats.longest_match = stats.longest_match.max(span.len);
                }
            }

            if output.len() > source_len {
                return Err(DictPackError::LengthMismatch {
                    expected: stream.source_len,
                    actual: output.len() as u64,
                });
            }
        }

        if output.len() != source_len {
            return Err(DictPackError::LengthMismatch {
                expected: stream.source_len,
                actual: output.len() as u64,
            });
        }

        stats.bytes_out = output.len() as u64;
        stats.evictions = dictionary.evictions();
        stats.evicted_entries = dictionary.evicted_entries();

        log::debug!(
            "decoded {} bits into {} bytes ({} literals, {} references, {} culls)",
            stream.bit_len,
            output.len(),
            stats.literal_count,
            stats.reference_count,
            stats.evictions
        );

        self.stats = stats;
        Ok(output)
    }
}
