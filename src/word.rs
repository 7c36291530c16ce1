//! Fixed-capacity word buffer
//!
//! Both reserved words and tokens assembled from the main text live in a
//! [`BoundedWord`]. Writes are checked, so an overlong word is reported to the
//! caller instead of spilling past the buffer.

use bstr::ByteSlice;
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of characters in a single word
pub const MAX_WORD_SIZE: usize = 20;

/// Whitespace as the C locale defines it: space, \t, \n, \v, \f, \r
#[inline]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Returned when a byte is pushed onto a full [`BoundedWord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

/// A word of at most [`MAX_WORD_SIZE`] bytes, compared byte-wise
#[derive(Clone, Copy)]
pub struct BoundedWord {
    buf: [u8; MAX_WORD_SIZE],
    len: usize,
}

impl BoundedWord {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_WORD_SIZE],
            len: 0,
        }
    }

    /// Build a word from a byte slice, failing if it does not fit
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CapacityExceeded> {
        let mut word = Self::new();
        for &b in bytes {
            word.try_push(b)?;
        }
        Ok(word)
    }

    /// Append one byte
    #[inline]
    pub fn try_push(&mut self, byte: u8) -> Result<(), CapacityExceeded> {
        if self.len == MAX_WORD_SIZE {
            return Err(CapacityExceeded);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MAX_WORD_SIZE
    }

    /// Reset to empty
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Lossy UTF-8 rendering of the word
    pub fn to_string_lossy(&self) -> String {
        self.as_bytes().to_str_lossy().into_owned()
    }
}

impl Default for BoundedWord {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for BoundedWord {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for BoundedWord {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for BoundedWord {}

impl PartialOrd for BoundedWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundedWord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Display for BoundedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bytes().as_bstr(), f)
    }
}

impl fmt::Debug for BoundedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bytes().as_bstr(), f)
    }
}
