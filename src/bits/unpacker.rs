//! BitUnpacker - reads flag and payload bits back out of a byte buffer
//!
//! The cursor is a byte/bit pair owned by each unpacker. An optional bit
//! limit marks where the meaningful bits end so that trailing pad bits are
//! never handed out.

use super::UnpackWidth;
use crate::{DictPackError, Result, Symbol};

/// Reads 1, 8 or 16 bits at a time, MSB-first
#[derive(Debug, Clone)]
pub struct BitUnpacker<'a> {
    data: &'a [u8],
    byte: usize,
    bit: u8,
    limit: u64,
}

impl<'a> BitUnpacker<'a> {
    /// Create an unpacker over every bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte: 0,
            bit: 0,
            limit: data.len() as u64 * 8,
        }
    }

    /// Create an unpacker that stops after `limit` bits.
    ///
    /// The limit is clamped to the bits actually present in `data`.
    pub fn with_bit_limit(data: &'a [u8], limit: u64) -> Self {
        Self {
            limit: limit.min(data.len() as u64 * 8),
            ..Self::new(data)
        }
    }

    /// Rewind the cursor to the first bit
    pub fn reset(&mut self) {
        self.byte = 0;
        self.bit = 0;
    }

    /// Bits consumed so far
    pub fn bit_position(&self) -> u64 {
        self.byte as u64 * 8 + self.bit as u64
    }

    /// Bits left before the limit
    pub fn remaining_bits(&self) -> u64 {
        self.limit.saturating_sub(self.bit_position())
    }

    /// True once the cursor has reached the limit
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Read `width` bits; the first bit read lands in the most significant
    /// position of the result
    pub fn unpack(&mut self, width: UnpackWidth) -> Result<u32> {
        let mut bits = width.bits();
        if self.remaining_bits() < bits as u64 {
            return Err(DictPackError::OutOfData {
                byte: self.byte,
                bit: self.bit,
                requested: bits,
            });
        }

        let mut value = 0u32;
        while bits > 0 {
            let available = 8 - self.bit;
            let take = bits.min(available);
            let current = self.data[self.byte] as u32;
            let chunk = (current >> (available - take)) & ((1u32 << take) - 1);

            value = (value << take) | chunk;
            self.bit += take;
            bits -= take;

            if self.bit == 8 {
                self.byte += 1;
                self.bit = 0;
            }
        }

        Ok(value)
    }

    /// Read a flag bit
    pub fn read_flag(&mut self) -> Result<bool> {
        Ok(self.unpack(UnpackWidth::Flag)? == 1)
    }

    /// Read a flag and the payload it announces
    pub fn unpack_symbol(&mut self) -> Result<Symbol> {
        if self.read_flag()? {
            Ok(Symbol::Reference(self.unpack(UnpackWidth::Word)? as u16))
        } else {
            Ok(Symbol::Literal(self.unpack(UnpackWidth::Byte)? as u8))
        }
    }
}
