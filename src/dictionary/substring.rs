//! Fixed-capacity substring key

use crate::common::{MAX_KEY_LEN, MIN_KEY_LEN};
use std::fmt;

/// A 3 to 5 byte sequence stored inline, usable as a hash key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substring {
    bytes: [u8; MAX_KEY_LEN],
    len: u8,
}

impl Substring {
    /// Build a key from `bytes`, or `None` if the length is outside 3..=5
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&bytes.len()) {
            return None;
        }

        let mut key = [0u8; MAX_KEY_LEN];
        key[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            bytes: key,
            len: bytes.len() as u8,
        })
    }

    /// Key for `window[pos..pos + len]`, or `None` if it runs past the end
    pub fn at(window: &[u8], pos: usize, len: usize) -> Option<Self> {
        let end = pos.checked_add(len)?;
        Self::new(window.get(pos..end)?)
    }

    /// The substring's bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True when the key holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Substring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Substring(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(Substring::new(b"ab").is_none());
        assert!(Substring::new(b"abcdef").is_none());
        assert_eq!(Substring::new(b"abc").unwrap().len(), 3);
        assert_eq!(Substring::new(b"abcde").unwrap().as_bytes(), b"abcde");
        assert!(!Substring::new(b"abc").unwrap().is_empty());
    }

    #[test]
    fn test_keys_differ_by_length() {
        // Zero padding must not make "ab\0" equal to "ab\0\0"
        let short = Substring::new(&[1, 2, 0]).unwrap();
        let long = Substring::new(&[1, 2, 0, 0]).unwrap();
        assert_ne!(short, long);
    }

    #[test]
    fn test_at_window() {
        let window = b"hello";
        assert_eq!(Substring::at(window, 1, 3).unwrap().as_bytes(), b"ell");
        assert!(Substring::at(window, 3, 3).is_none());
        assert!(Substring::at(window, usize::MAX, 3).is_none());
    }

    #[test]
    fn test_debug_is_hex() {
        let key = Substring::new(&[0xDE, 0xAD, 0xBE]).unwrap();
        assert_eq!(format!("{key:?}"), "Substring(deadbe)");
    }
}
