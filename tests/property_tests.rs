//! Property-based tests for dictpack
//!
//! These tests use randomized inputs to verify correctness across a wide range
//! of data patterns and dictionary configurations.

use dictpack::dictionary::Substring;
use dictpack::{
    decode_bytes, encode_bytes, encode_bytes_with_config, BitPacker, BitUnpacker,
    DictionaryConfig, PackWidth, SubstringDictionary, UnpackWidth,
};
use proptest::prelude::*;

fn small_configs() -> Vec<DictionaryConfig> {
    vec![
        DictionaryConfig::new(8, 1).unwrap(),
        DictionaryConfig::new(32, 5).unwrap(),
        DictionaryConfig::new(200, 64).unwrap(),
        DictionaryConfig::default(),
    ]
}

proptest! {
    #[test]
    fn test_decompression_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are rarely a valid frame; errors are fine, panics are not
        let _ = decode_bytes(&data);
    }
}

proptest! {
    #[test]
    fn test_corrupted_stream_never_panics(
        data in prop::collection::vec(any::<u8>(), 1..200),
        flip in any::<prop::sample::Index>(),
    ) {
        let mut frame = encode_bytes(&data).unwrap();
        let index = flip.index(frame.len());
        frame[index] ^= 0xFF;
        let _ = decode_bytes(&frame);
    }
}

proptest! {
    #[test]
    fn test_round_trip(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let compressed = encode_bytes(&data)?;
        let decompressed = decode_bytes(&compressed)?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_ascii_round_trip(
        data in prop::collection::vec(prop::char::range(' ', '~'), 10..500)
    ) {
        let ascii_bytes: Vec<u8> = data.into_iter().map(|c| c as u8).collect();

        for config in small_configs() {
            let compressed = encode_bytes_with_config(&ascii_bytes, config)?;
            let decompressed = decode_bytes(&compressed)?;
            prop_assert_eq!(&ascii_bytes[..], &decompressed[..]);
        }
    }
}

proptest! {
    #[test]
    fn test_repetitive_patterns(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeat_count in 2..50u8
    ) {
        let mut data = Vec::new();
        for _ in 0..repeat_count {
            data.extend_from_slice(&pattern);
        }

        for config in small_configs() {
            let compressed = encode_bytes_with_config(&data, config)?;
            let decompressed = decode_bytes(&compressed)?;
            prop_assert_eq!(&data[..], &decompressed[..]);
        }
    }
}

proptest! {
    #[test]
    fn test_single_byte_runs(byte_value in any::<u8>(), size in 1..600usize) {
        let data = vec![byte_value; size];

        for config in small_configs() {
            let compressed = encode_bytes_with_config(&data, config)?;
            let decompressed = decode_bytes(&compressed)?;
            prop_assert_eq!(&data[..], &decompressed[..]);
        }
    }
}

proptest! {
    #[test]
    fn test_eviction_heavy_round_trip(
        data in prop::collection::vec(0u8..6, 100..1500),
        capacity in 3u16..64,
        cull_target in 1usize..16,
    ) {
        // A narrow alphabet with a tiny dictionary forces frequent culls
        let config = DictionaryConfig::new(capacity, cull_target).unwrap();
        let compressed = encode_bytes_with_config(&data, config)?;
        let decompressed = decode_bytes(&compressed)?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_expansion_bound(data in prop::collection::vec(any::<u8>(), 0..500)) {
        // Worst case every byte becomes a 9-bit literal
        let compressed = encode_bytes(&data)?;
        let stream_len = compressed.len() - dictpack::frame::FRAME_HEADER_LEN;
        prop_assert!(stream_len <= (data.len() * 9).div_ceil(8));
    }
}

proptest! {
    #[test]
    fn test_compression_deterministic(data in prop::collection::vec(any::<u8>(), 10..300)) {
        for config in small_configs() {
            let compressed1 = encode_bytes_with_config(&data, config)?;
            let compressed2 = encode_bytes_with_config(&data, config)?;
            prop_assert_eq!(compressed1, compressed2);
        }
    }
}

proptest! {
    #[test]
    fn test_pack_unpack_duality(
        groups in prop::collection::vec((0u8..3, any::<u16>()), 0..200)
    ) {
        let mut packer = BitPacker::new();
        let mut total_bits = 0u64;
        for &(kind, value) in &groups {
            match kind {
                0 => packer.pack(PackWidth::Flag, (value & 1) as u32),
                1 => packer.pack(PackWidth::Literal, ((value & 0xFF) as u32) << 1),
                _ => packer.pack(PackWidth::Reference, ((value as u32) << 1) | 1),
            }
            total_bits += match kind {
                0 => 1,
                1 => 9,
                _ => 17,
            };
        }
        prop_assert_eq!(packer.bit_len(), total_bits);

        let packed = packer.finish();
        prop_assert_eq!(packed.len() as u64, total_bits.div_ceil(8));

        let mut unpacker = BitUnpacker::with_bit_limit(&packed, total_bits);
        for &(kind, value) in &groups {
            match kind {
                0 => prop_assert_eq!(unpacker.unpack(UnpackWidth::Flag)?, (value & 1) as u32),
                1 => {
                    prop_assert_eq!(unpacker.unpack(UnpackWidth::Flag)?, 0);
                    prop_assert_eq!(unpacker.unpack(UnpackWidth::Byte)?, (value & 0xFF) as u32);
                }
                _ => {
                    prop_assert_eq!(unpacker.unpack(UnpackWidth::Flag)?, 1);
                    prop_assert_eq!(unpacker.unpack(UnpackWidth::Word)?, value as u32);
                }
            }
        }
        prop_assert!(unpacker.is_exhausted());
    }
}

proptest! {
    #[test]
    fn test_dictionary_id_invariants(
        keys in prop::collection::vec(prop::collection::vec(0u8..4, 3..=5), 1..300),
        capacity in 1u16..40,
        cull_target in 1usize..10,
    ) {
        let config = DictionaryConfig::new(capacity, cull_target).unwrap();
        let mut dictionary = SubstringDictionary::new(config);

        for key in &keys {
            let substring = Substring::new(key).unwrap();
            let id = dictionary.insert_or_bump(substring)?;

            prop_assert!((1..=capacity).contains(&id));
            prop_assert_eq!(dictionary.find(key).map(|e| e.id), Some(id));
            prop_assert_eq!(dictionary.len() + dictionary.free_ids(), capacity as usize);
            prop_assert!(dictionary.check_invariants());
        }

        let mut ids: Vec<u16> = dictionary.entries().map(|e| e.id).collect();
        let live = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), live);
    }
}
