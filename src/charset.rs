//! Ordered character sets for scroll-through text entry.
//!
//! A [`CharacterSet`] is an ordered union of inclusive character-code ranges.
//! Flattening the ranges in the order given yields an index `0..len()` that
//! [`Input`](crate::ui::Input) steps through when the user turns the encoder.
//!
//! Sets are `const` so the defaults below are built at compile time and
//! shared by every widget that uses them.

use crate::error::{UiError, UiResult};

/// Inclusive range of character codes.
pub type CharRange = (u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    ranges: &'static [CharRange],
    len: usize,
}

impl CharacterSet {
    /// Space, digits, upper and lower case letters, then punctuation.
    pub const DEFAULT: CharacterSet = CharacterSet::new(&[
        (b' ', b' '),
        (b'0', b'9'),
        (b'A', b'Z'),
        (b'a', b'z'),
        (b'!', b'/'),
        (b':', b'@'),
        (b'[', b'`'),
        (b'{', b'~'),
    ]);

    pub const DIGITS: CharacterSet = CharacterSet::new(&[(b'0', b'9')]);

    pub const HEX: CharacterSet = CharacterSet::new(&[(b'0', b'9'), (b'a', b'f')]);

    /// Signed decimal numbers.
    pub const DECIMAL: CharacterSet = CharacterSet::new(&[(b'0', b'9'), (b'.', b'.'), (b'-', b'-')]);

    /// Every printable ASCII character in code order.
    pub const PRINTABLE: CharacterSet = CharacterSet::new(&[(b' ', b'~')]);

    /// Build a set from disjoint ASCII ranges.
    ///
    /// # Panics
    /// Panics if a range is reversed, leaves ASCII, or overlaps another range.
    /// Used in `const` context this is a compile error instead. Use
    /// [`CharacterSet::try_new`] for ranges that come from host data.
    pub const fn new(ranges: &'static [CharRange]) -> Self {
        match Self::checked_len(ranges) {
            Ok(len) => Self { ranges, len },
            Err(_) => panic!("character ranges must be ordered, ASCII and disjoint"),
        }
    }

    /// Build a set from disjoint ASCII ranges, rejecting invalid ones.
    pub fn try_new(ranges: &'static [CharRange]) -> UiResult<Self> {
        let len = Self::checked_len(ranges)?;
        Ok(Self { ranges, len })
    }

    const fn checked_len(ranges: &[CharRange]) -> UiResult<usize> {
        let mut len = 0;
        let mut i = 0;
        while i < ranges.len() {
            let (start, end) = ranges[i];
            if start > end || end >= 0x80 {
                return Err(UiError::InvalidCharRange { index: i });
            }

            let mut j = 0;
            while j < i {
                let (other_start, other_end) = ranges[j];
                if !(end < other_start || start > other_end) {
                    return Err(UiError::InvalidCharRange { index: i });
                }
                j += 1;
            }

            len += (end - start) as usize + 1;
            i += 1;
        }
        Ok(len)
    }

    /// Number of characters in the set.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, c: u8) -> bool {
        self.index_of(c).is_some()
    }

    /// Flattened index of `c`, or `None` if it is not in the set.
    pub fn index_of(&self, c: u8) -> Option<usize> {
        let mut offset = 0;
        for &(start, end) in self.ranges {
            if (start..=end).contains(&c) {
                return Some(offset + (c - start) as usize);
            }
            offset += (end - start) as usize + 1;
        }
        None
    }

    /// Character at a flattened index.
    pub fn char_at(&self, index: usize) -> Option<u8> {
        let mut remaining = index;
        for &(start, end) in self.ranges {
            let width = (end - start) as usize + 1;
            if remaining < width {
                return Some(start + remaining as u8);
            }
            remaining -= width;
        }
        None
    }

    /// Move `c` by `delta` positions through the set, clamped to its ends.
    ///
    /// A character outside the set snaps to the first member when stepping
    /// forward and to the last member when stepping backward.
    pub fn step(&self, c: u8, delta: i32) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let last = self.len - 1;
        let target = match self.index_of(c) {
            Some(index) => (index as i64 + delta as i64).clamp(0, last as i64) as usize,
            None if delta >= 0 => 0,
            None => last,
        };
        self.char_at(target)
    }

    /// Iterate over the members in index order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.ranges.iter().flat_map(|&(start, end)| start..=end)
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}
