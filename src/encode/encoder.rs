//! Encoder - greedy longest-match state machine
//!
//! At each input position the encoder asks the dictionary for the longest
//! known substring (5, then 4, then 3 bytes). A hit becomes a reference
//! symbol and skips ahead; a miss records every substring it tried and emits
//! the current byte as a literal.

use crate::bits::BitPacker;
use crate::common::{MAX_KEY_LEN, MIN_KEY_LEN};
use crate::dictionary::{Substring, SubstringDictionary};
use crate::frame::EncodedStream;
use crate::{CodecStats, DictionaryConfig, Result, Symbol};

/// Compression session
#[derive(Debug, Clone)]
pub struct Encoder {
    config: DictionaryConfig,
    stats: CodecStats,
}

impl Encoder {
    /// Create an encoder with a validated configuration
    pub fn new(config: DictionaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stats: CodecStats::default(),
        })
    }

    /// Configuration used for every pass
    pub fn config(&self) -> DictionaryConfig {
        self.config
    }

    /// Statistics of the most recent pass
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Encode `input` into a zero-padded bit-stream.
    ///
    /// Each call starts from an empty dictionary.
    pub fn encode(&mut self, input: &[u8]) -> Result<EncodedStream> {
        // Worst case is 9 bits per byte
        let mut packer = BitPacker::with_capacity(input.len() + input.len() / 8 + 1);
        self.run(input, |symbol| packer.pack_symbol(symbol))?;

        let bit_len = packer.bit_len();
        let data = packer.finish();

        self.stats.bit_len = bit_len;
        self.stats.bytes_out = data.len() as u64;

        log::debug!(
            "encoded {} bytes into {} bits ({} literals, {} references, {} culls)",
            input.len(),
            bit_len,
            self.stats.literal_count,
            self.stats.reference_count,
            self.stats.evictions
        );

        Ok(EncodedStream {
            data,
            bit_len,
            source_len: input.len() as u64,
            config: self.config,
        })
    }

    /// The symbol sequence `encode` would pack, without packing it.
    ///
    /// Stats are reset for the pass; `bytes_out` stays 0 since nothing is
    /// packed.
    pub fn symbols(&mut self, input: &[u8]) -> Result<Vec<Symbol>> {
        let mut symbols = Vec::new();
        self.run(input, |symbol| symbols.push(symbol))?;
        self.stats.bit_len = symbols.iter().map(Symbol::bit_len).sum();
        Ok(symbols)
    }

    fn run<F: FnMut(Symbol)>(&mut self, input: &[u8], mut emit: F) -> Result<()> {
        let mut dictionary = SubstringDictionary::new(self.config);
        let mut stats = CodecStats {
            bytes_in: input.len() as u64,
            ..CodecStats::default()
        };

        let mut pos = 0;
        while pos < input.len() {
            // Within the last 4 bytes nothing is looked up or recorded
            if pos + MAX_KEY_LEN > input.len() {
                emit(Symbol::Literal(input[pos]));
                stats.literal_count += 1;
                pos += 1;
                continue;
            }

            if let Some(hit) = dictionary.lookup(input, pos) {
                dictionary.bump(hit.id);
                emit(Symbol::Reference(hit.id));

                stats.reference_count += 1;
                stats.longest_match = stats.longest_match.max(hit.len);
                pos += hit.len;
                continue;
            }

            // Every length was a miss; remember them all
            for len in (MIN_KEY_LEN..=MAX_KEY_LEN).rev() {
                if let Some(key) = Substring::at(input, pos, len) {
                    dictionary.insert_or_bump(key)?;
                }
            }

            emit(Symbol::Literal(input[pos]));
            stats.literal_count += 1;
            pos += 1;
        }

        stats.evictions = dictionary.evictions();
        stats.evicted_entries = dictionary.evicted_entries();
        self.stats = stats;
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            config: DictionaryConfig::default(),
            stats: CodecStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol::{Literal, Reference};

    #[test]
    fn test_empty_input() {
        let mut encoder = Encoder::default();
        let stream = encoder.encode(b"").unwrap();
        assert!(stream.data.is_empty());
        assert_eq!(stream.bit_len, 0);
        assert_eq!(stream.source_len, 0);
    }

    #[test]
    fn test_no_repeats_is_all_literals() {
        let mut encoder = Encoder::default();
        let symbols = encoder.symbols(b"abcdefgh").unwrap();
        assert_eq!(symbols.len(), 8);
        assert!(symbols.iter().all(|s| matches!(s, Literal(_))));
        assert_eq!(encoder.stats().bit_len, 72);
    }

    #[test]
    fn test_repeat_becomes_reference() {
        let mut encoder = Encoder::default();
        // pos 0 inserts abcde (1), abcd (2), abc (3); pos 5 finds abcde
        let symbols = encoder.symbols(b"abcdeabcde").unwrap();
        assert_eq!(
            symbols,
            vec![
                Literal(b'a'),
                Literal(b'b'),
                Literal(b'c'),
                Literal(b'd'),
                Literal(b'e'),
                Reference(1),
            ]
        );
        assert_eq!(encoder.stats().reference_count, 1);
        assert_eq!(encoder.stats().longest_match, 5);
    }

    #[test]
    fn test_overlapping_run() {
        let mut encoder = Encoder::default();
        // pos 0 inserts aaaaa (1), aaaa (2), aaa (3); pos 1 matches aaaaa
        let symbols = encoder.symbols(b"aaaaaaaa").unwrap();
        assert_eq!(
            symbols,
            vec![Literal(b'a'), Reference(1), Literal(b'a'), Literal(b'a')]
        );
    }

    #[test]
    fn test_tail_shorter_than_max_key_is_literal() {
        let mut encoder = Encoder::default();
        // "xyzz" at pos 5 is in the dictionary, but pos 5 + 5 runs past the end
        let symbols = encoder.symbols(b"xyzzyxyzz").unwrap();
        assert_eq!(symbols.len(), 9);
        assert!(symbols.iter().all(|s| matches!(s, Literal(_))));
        assert_eq!(encoder.stats().reference_count, 0);
    }

    #[test]
    fn test_match_ending_exactly_at_input_end() {
        let mut encoder = Encoder::default();
        // pos 5 + 5 == len, so the lookup still runs
        let symbols = encoder.symbols(b"xyzzyxyzzy").unwrap();
        assert_eq!(symbols.last(), Some(&Reference(1)));
        assert_eq!(symbols.len(), 6);
    }

    #[test]
    fn test_symbols_leaves_bytes_out_zero() {
        let mut encoder = Encoder::default();
        encoder.encode(b"abcdeabcde").unwrap();
        assert!(encoder.stats().bytes_out > 0);

        encoder.symbols(b"abcdeabcde").unwrap();
        assert_eq!(encoder.stats().bytes_out, 0);
        assert_eq!(encoder.stats().bytes_in, 10);
        assert_eq!(encoder.stats().bit_len, 5 * 9 + 17);
    }

    #[test]
    fn test_encode_pads_final_byte() {
        let mut encoder = Encoder::default();
        let stream = encoder.encode(b"a").unwrap();
        assert_eq!(stream.bit_len, 9);
        assert_eq!(stream.data, vec![0x30, 0x80]);
        assert_eq!(encoder.stats().bytes_out, 2);
    }

    #[test]
    fn test_small_dictionary_culls() {
        let config = DictionaryConfig::new(16, 4).unwrap();
        let mut encoder = Encoder::new(config).unwrap();
        let input: Vec<u8> = (0..=255u8).collect();
        encoder.encode(&input).unwrap();
        assert!(encoder.stats().evictions > 0);
        assert_eq!(encoder.stats().literal_count, 256);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DictionaryConfig {
            capacity: 0,
            cull_target: 1,
        };
        assert!(Encoder::new(config).is_err());
    }
}
