//! Domain pair comparison
//!
//! This module compares two domains by their shared letters.

use crate::constants::REPORT_DECIMALS;
use crate::domain::letters::LetterSet;
use crate::domain::tier::SimilarityTier;
use std::cmp::Reverse;

/// Result of comparing two domains
///
/// `common_count` always equals `common_letters.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityPair<'a> {
    /// First domain (lower enumeration index)
    pub domain_a: &'a str,
    /// Second domain
    pub domain_b: &'a str,
    /// Letters present in both domains
    pub common_letters: LetterSet,
    /// Number of shared letters
    pub common_count: usize,
    /// Enumeration position `(i, j)` with `i < j`
    pub position: (usize, usize),
}

impl<'a> SimilarityPair<'a> {
    /// Build a pair from precomputed letter sets
    ///
    /// Returns `None` when the domains share no letters.
    #[inline]
    pub fn from_letter_sets(
        domain_a: &'a str,
        domain_b: &'a str,
        letters_a: &LetterSet,
        letters_b: &LetterSet,
        position: (usize, usize),
    ) -> Option<Self> {
        let common_letters = letters_a.intersection(letters_b);
        if common_letters.is_empty() {
            return None;
        }

        Some(Self {
            domain_a,
            domain_b,
            common_count: common_letters.len(),
            common_letters,
            position,
        })
    }

    /// Compare two domains directly
    pub fn compare(
        domain_a: &'a str,
        domain_b: &'a str,
        position: (usize, usize),
    ) -> Option<Self> {
        Self::from_letter_sets(
            domain_a,
            domain_b,
            &LetterSet::from_str_lowercase(domain_a),
            &LetterSet::from_str_lowercase(domain_b),
            position,
        )
    }

    /// Tier of this pair (always `Some` for a constructed pair)
    pub fn tier(&self) -> Option<SimilarityTier> {
        SimilarityTier::from_common_count(self.common_count)
    }

    /// Shared letters as a percentage of the longer domain, rounded to 2 decimals
    pub fn similarity_percent(&self) -> f64 {
        let longest = self
            .domain_a
            .chars()
            .count()
            .max(self.domain_b.chars().count());
        if longest == 0 {
            return 0.0;
        }
        round_to(
            self.common_count as f64 / longest as f64 * 100.0,
            REPORT_DECIMALS,
        )
    }

    /// Reporting order key: descending count, then enumeration order
    #[inline]
    pub fn report_key(&self) -> (Reverse<usize>, usize, usize) {
        (Reverse(self.common_count), self.position.0, self.position.1)
    }
}

/// Round a value to the given number of decimal places, ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_perfect_boundary() {
        let pair = SimilarityPair::compare("abcdx", "abcdy", (0, 1)).unwrap();
        assert_eq!(pair.common_count, 4);
        assert_eq!(pair.tier(), Some(SimilarityTier::Perfect));
    }

    #[test]
    fn test_compare_basic_boundary() {
        let pair = SimilarityPair::compare("ab", "bc", (0, 1)).unwrap();
        assert_eq!(pair.common_count, 1);
        assert_eq!(pair.common_letters.join(""), "b");
        assert_eq!(pair.tier(), Some(SimilarityTier::Basic));
    }

    #[test]
    fn test_compare_medium_boundary() {
        let pair = SimilarityPair::compare("abc", "cbaz", (0, 1)).unwrap();
        assert_eq!(pair.common_count, 3);
        assert_eq!(pair.tier(), Some(SimilarityTier::Medium));
    }

    #[test]
    fn test_compare_disjoint() {
        assert!(SimilarityPair::compare("xy", "zz", (0, 1)).is_none());
    }

    #[test]
    fn test_count_matches_letters() {
        let pair = SimilarityPair::compare("apple.com", "banana.com", (0, 1)).unwrap();
        assert_eq!(pair.common_count, pair.common_letters.len());
    }

    #[test]
    fn test_similarity_percent() {
        // "ab" vs "bc": 1 / 2 * 100
        let pair = SimilarityPair::compare("ab", "bc", (0, 1)).unwrap();
        assert_eq!(pair.similarity_percent(), 50.0);

        // 1 / 3 * 100 = 33.333...
        let pair = SimilarityPair::compare("abc", "xa", (0, 1)).unwrap();
        assert_eq!(pair.similarity_percent(), 33.33);
    }

    #[test]
    fn test_similarity_percent_counts_characters() {
        // 2 characters each, 1 shared
        let pair = SimilarityPair::compare("éa", "éb", (0, 1)).unwrap();
        assert_eq!(pair.similarity_percent(), 50.0);
    }

    #[test]
    fn test_report_key_ordering() {
        let strong = SimilarityPair::compare("abcd", "abcd", (3, 4)).unwrap();
        let weak = SimilarityPair::compare("ab", "bc", (0, 1)).unwrap();
        assert!(strong.report_key() < weak.report_key());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234567, 2), 1.23);
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(3.0, 2), 3.0);
        // exact binary ties
        assert_eq!(round_to(3.125, 2), 3.12);
        assert_eq!(round_to(3.375, 2), 3.38);
    }

    #[test]
    fn test_similarity_percent_tie_rounds_to_even() {
        // 1 / 32 * 100 = 3.125 exactly
        let long = "a".repeat(32);
        let pair = SimilarityPair::compare(&long, "ab", (0, 1)).unwrap();
        assert_eq!(pair.similarity_percent(), 3.12);
    }
}
