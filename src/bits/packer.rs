//! BitPacker - serializes flag/payload groups into bytes
//!
//! Completed bytes are appended to the output as soon as they fill up; the
//! 0-7 bits that do not yet form a byte are carried as residue into the next
//! call.

use super::PackWidth;
use crate::Symbol;

/// Packs 1, 9 or 17 bit groups into a byte buffer, MSB-first
#[derive(Debug, Default, Clone)]
pub struct BitPacker {
    output: Vec<u8>,
    /// Pending bits, left-aligned in the byte
    residue: u8,
    /// Number of pending bits (0-7)
    residue_len: u8,
    /// Total bits packed so far
    bit_len: u64,
}

impl BitPacker {
    /// Create an empty packer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty packer with room for `capacity` output bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append one group to the stream.
    ///
    /// For 9 and 17 bit groups `value` is laid out as `payload << 1 | flag`.
    /// The flag is emitted first, then the payload most-significant bit
    /// first. A 1 bit group emits the low bit of `value`.
    pub fn pack(&mut self, width: PackWidth, value: u32) {
        let bits = width.bits();
        let value = value & ((1u32 << bits) - 1);

        // Rotate the flag from the low bit to the front of the wire order
        let wire = match width {
            PackWidth::Flag => value,
            PackWidth::Literal | PackWidth::Reference => {
                ((value & 1) << (bits - 1)) | (value >> 1)
            }
        };

        self.write_msb(wire, bits);
    }

    /// Append a literal or reference symbol
    pub fn pack_symbol(&mut self, symbol: Symbol) {
        let width = match symbol {
            Symbol::Literal(_) => PackWidth::Literal,
            Symbol::Reference(_) => PackWidth::Reference,
        };
        self.pack(width, symbol.group());
    }

    /// Write the low `bits` bits of `value`, most significant first
    fn write_msb(&mut self, value: u32, mut bits: u8) {
        self.bit_len += bits as u64;

        while bits > 0 {
            let free = 8 - self.residue_len;
            let take = bits.min(free);
            let chunk = ((value >> (bits - take)) & ((1u32 << take) - 1)) as u8;

            self.residue |= chunk << (free - take);
            self.residue_len += take;
            bits -= take;

            if self.residue_len == 8 {
                self.output.push(self.residue);
                self.residue = 0;
                self.residue_len = 0;
            }
        }
    }

    /// Completed bytes, excluding the residue
    pub fn bytes(&self) -> &[u8] {
        &self.output
    }

    /// Number of pending bits that have not completed a byte
    pub fn residue_len(&self) -> u8 {
        self.residue_len
    }

    /// Pending bits, left-aligned, with the unused low bits zero
    pub fn residue(&self) -> u8 {
        self.residue
    }

    /// Total bits packed, not counting any padding
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Number of zero bits `finish` will append
    pub fn padding_bits(&self) -> u8 {
        if self.residue_len == 0 {
            0
        } else {
            8 - self.residue_len
        }
    }

    /// Flush the residue, zero-padded to a full byte, and return the output
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.residue_len > 0 {
            self.output.push(self.residue);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_literal_group() {
        let mut packer = BitPacker::new();
        packer.pack(PackWidth::Literal, 0xFF << 1);

        // flag 0, then 1111_1111
        assert_eq!(packer.bytes(), &[0b0111_1111]);
        assert_eq!(packer.residue_len(), 1);
        assert_eq!(packer.residue(), 0b1000_0000);
        assert_eq!(packer.padding_bits(), 7);
        assert_eq!(packer.finish(), vec![0x7F, 0x80]);
    }

    #[test]
    fn test_reference_group_flag_leads() {
        let mut packer = BitPacker::new();
        packer.pack(PackWidth::Reference, (0x0001 << 1) | 1);

        // 1 | 0000_0000_0000_0001
        assert_eq!(packer.bit_len(), 17);
        assert_eq!(packer.finish(), vec![0x80, 0x00, 0x80]);
    }

    #[test]
    fn test_residue_carries_across_calls() {
        let mut packer = BitPacker::new();
        for _ in 0..7 {
            packer.pack(PackWidth::Flag, 1);
        }
        assert!(packer.bytes().is_empty());
        assert_eq!(packer.residue_len(), 7);
        assert_eq!(packer.residue(), 0b1111_1110);

        packer.pack(PackWidth::Flag, 1);
        assert_eq!(packer.bytes(), &[0xFF]);
        assert_eq!(packer.residue_len(), 0);
    }

    #[test]
    fn test_pack_symbol() {
        let mut packer = BitPacker::new();
        packer.pack_symbol(Symbol::Literal(b'a'));
        packer.pack_symbol(Symbol::Reference(0x1234));
        assert_eq!(packer.bit_len(), 26);

        // 0 0110_0001 1 0001_0010_0011_0100 + 6 pad bits
        assert_eq!(hex::encode(packer.finish()), "30c48d00");
    }

    #[test]
    fn test_excess_value_bits_are_ignored() {
        let mut packer = BitPacker::new();
        packer.pack(PackWidth::Flag, 0b10);
        assert_eq!(packer.residue(), 0);
        assert_eq!(packer.bit_len(), 1);
    }

    #[test]
    fn test_finish_on_aligned_stream_adds_nothing() {
        let mut packer = BitPacker::with_capacity(16);
        for byte in [0xDEu32, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0x0A] {
            packer.pack(PackWidth::Literal, byte << 1);
        }
        assert_eq!(packer.residue_len(), 0);
        assert_eq!(packer.padding_bits(), 0);
        assert_eq!(packer.finish().len(), 9);
    }
}
