//! Function display keys and the set of keys enabled on the current screen.
//!
//! The active set always iterates in canonical letter order (`A` through `I`),
//! regardless of the order keys were enabled in or the bit order of the mask
//! that produced it.

mod mask;

pub use mask::{parse_mask, MaskError};

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A function display key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fdk {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Fdk {
    /// Every key, in canonical order.
    pub const ALL: [Fdk; 9] = [
        Fdk::A,
        Fdk::B,
        Fdk::C,
        Fdk::D,
        Fdk::E,
        Fdk::F,
        Fdk::G,
        Fdk::H,
        Fdk::I,
    ];

    /// Zero-based rank: `A` is 0, `B` is 1 and so on.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Upper-case letter of the key.
    pub fn letter(self) -> char {
        char::from(b'A' + self as u8)
    }

    /// Case-insensitive lookup. Letters outside `A`-`I` return `None`.
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|key| key.letter() == upper)
    }

    fn bit(self) -> u16 {
        1 << self.rank()
    }
}

impl fmt::Display for Fdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Ordered, duplicate-free set of active keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FdkSet {
    bits: u16,
}

impl FdkSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, key: Fdk) {
        self.bits |= key.bit();
    }

    pub fn contains(&self, key: Fdk) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Keys in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Fdk> {
        Fdk::ALL.into_iter().filter(move |key| self.contains(*key))
    }

    /// Letters in canonical order, e.g. `['C', 'D']`.
    pub fn letters(&self) -> Vec<char> {
        self.iter().map(Fdk::letter).collect()
    }
}

impl FromIterator<Fdk> for FdkSet {
    fn from_iter<T: IntoIterator<Item = Fdk>>(iter: T) -> Self {
        let mut set = FdkSet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl fmt::Display for FdkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.iter().map(Fdk::letter).collect();
        write!(f, "[{}]", letters)
    }
}

impl Serialize for FdkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_letter_is_case_insensitive() {
        assert_eq!(Fdk::from_letter('a'), Some(Fdk::A));
        assert_eq!(Fdk::from_letter('I'), Some(Fdk::I));
        assert_eq!(Fdk::from_letter('j'), None);
        assert_eq!(Fdk::from_letter('1'), None);
    }

    #[test]
    fn test_rank_follows_letter_order() {
        assert_eq!(Fdk::A.rank(), 0);
        assert_eq!(Fdk::D.rank(), 3);
        assert_eq!(Fdk::I.rank(), 8);
    }

    #[test]
    fn test_set_iterates_in_canonical_order() {
        let set: FdkSet = [Fdk::G, Fdk::A, Fdk::D, Fdk::A].into_iter().collect();
        assert_eq!(set.letters(), vec!['A', 'D', 'G']);
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "[ADG]");
    }

    #[test]
    fn test_set_serializes_as_letter_list() {
        let set: FdkSet = [Fdk::C, Fdk::D].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["C","D"]"#);
    }
}
