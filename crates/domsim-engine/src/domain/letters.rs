//! Letter sets
//!
//! A `LetterSet` is the set of distinct lowercase characters of a string.
//! Every Unicode scalar counts as a "letter", including digits and
//! punctuation such as `.` and `-`.

use serde::Serialize;

/// Set of distinct lowercase characters
///
/// ASCII characters live in a 128-bit mask so that the common case
/// intersects in O(1). Other characters are kept sorted and deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LetterSet {
    ascii: u128,
    other: Vec<char>,
}

impl LetterSet {
    /// Build the letter set of a string (case-insensitive)
    pub fn from_str_lowercase(s: &str) -> Self {
        let mut ascii = 0u128;
        let mut other = Vec::new();

        for c in s.to_lowercase().chars() {
            if c.is_ascii() {
                ascii |= 1u128 << (c as u32);
            } else {
                other.push(c);
            }
        }

        other.sort_unstable();
        other.dedup();

        Self { ascii, other }
    }

    /// Number of distinct characters
    #[inline]
    pub fn len(&self) -> usize {
        self.ascii.count_ones() as usize + self.other.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ascii == 0 && self.other.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            self.ascii & (1u128 << (c as u32)) != 0
        } else {
            self.other.binary_search(&c).is_ok()
        }
    }

    /// Intersection of two letter sets
    pub fn intersection(&self, rhs: &LetterSet) -> LetterSet {
        let ascii = self.ascii & rhs.ascii;

        if self.other.is_empty() || rhs.other.is_empty() {
            return LetterSet {
                ascii,
                other: Vec::new(),
            };
        }

        // Both sides are sorted: linear merge
        let mut other = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.other.len() && j < rhs.other.len() {
            match self.other[i].cmp(&rhs.other[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    other.push(self.other[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        LetterSet { ascii, other }
    }

    /// Iterate characters in ascending code point order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        let ascii = self.ascii;
        (0u8..128)
            .filter(move |&b| ascii & (1u128 << b) != 0)
            .map(char::from)
            .chain(self.other.iter().copied())
    }

    /// Characters joined with a separator, in ascending order
    pub fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push(c);
        }
        out
    }
}

impl Serialize for LetterSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Shared letters of two strings (case-insensitive)
pub fn common_letters(a: &str, b: &str) -> LetterSet {
    LetterSet::from_str_lowercase(a).intersection(&LetterSet::from_str_lowercase(b))
}
