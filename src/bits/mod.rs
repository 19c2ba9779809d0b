//! Bit-level packing and unpacking
//!
//! The encoded stream is a sequence of fixed-width groups. The packer accepts
//! 1, 9 or 17 bit groups (a flag bit plus an optional 8 or 16 bit payload) and
//! the unpacker hands back 1, 8 or 16 bits at a time, so a symbol is read as
//! a flag followed by its payload.
//!
//! Bits fill bytes most-significant first. Within a 9/17 bit group the flag
//! (the group's low bit) goes out first, followed by the payload MSB-first.

mod packer;
mod unpacker;

pub use packer::BitPacker;
pub use unpacker::BitUnpacker;

use crate::{DictPackError, Result};

/// Group widths accepted by [`BitPacker::pack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackWidth {
    /// A lone flag bit
    Flag = 1,
    /// Flag plus an 8-bit literal
    Literal = 9,
    /// Flag plus a 16-bit identifier
    Reference = 17,
}

impl PackWidth {
    /// Number of bits in the group
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PackWidth {
    type Error = DictPackError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(PackWidth::Flag),
            9 => Ok(PackWidth::Literal),
            17 => Ok(PackWidth::Reference),
            _ => Err(DictPackError::InvalidWidth(value)),
        }
    }
}

/// Widths accepted by [`BitUnpacker::unpack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackWidth {
    /// One flag bit
    Flag = 1,
    /// An 8-bit literal
    Byte = 8,
    /// A 16-bit identifier
    Word = 16,
}

impl UnpackWidth {
    /// Number of bits read
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for UnpackWidth {
    type Error = DictPackError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(UnpackWidth::Flag),
            8 => Ok(UnpackWidth::Byte),
            16 => Ok(UnpackWidth::Word),
            _ => Err(DictPackError::InvalidWidth(value)),
        }
    }
}
