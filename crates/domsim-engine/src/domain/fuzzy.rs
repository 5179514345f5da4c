//! Token-sort fuzzy scoring
//!
//! Scores two strings on a 0-100 scale after normalising them into sorted
//! token form. The ratio is based on the indel edit distance (insertions and
//! deletions only) normalised to the combined length of both strings.

use crate::constants::MAX_SCORE;
use std::ops::RangeInclusive;

const LATIN1_UPPER: RangeInclusive<char> = '\u{80}'..='\u{ff}';

/// Normalise a string for scoring
///
/// Characters in the Latin-1 upper half (U+0080..=U+00FF) are dropped, every
/// character that is not alphanumeric or `_` becomes a space, the result is
/// lower-cased and trimmed. Other scripts (Cyrillic, CJK, ...) are kept.
pub fn normalize(s: &str) -> String {
    let processed: String = s
        .chars()
        .filter(|c| !LATIN1_UPPER.contains(c))
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    processed.to_lowercase().trim().to_string()
}

/// Normalise a string and sort its whitespace-separated tokens
pub fn token_sort_key(s: &str) -> String {
    let normalized = normalize(s);
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Length of the longest common subsequence of two sequences
fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Keep the shorter string in the row
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for x in long {
        for (j, y) in short.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Longest common subsequence in characters
fn common_chars(a: &str, b: &str) -> usize {
    if a.is_ascii() && b.is_ascii() {
        return lcs_len(a.as_bytes(), b.as_bytes());
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    lcs_len(&a, &b)
}

/// Indel distance: minimum insertions plus deletions turning `a` into `b`
///
/// Lengths are counted in characters.
pub fn indel_distance(a: &str, b: &str) -> usize {
    a.chars().count() + b.chars().count() - 2 * common_chars(a, b)
}

/// Similarity ratio of two already-normalised keys (0-100)
///
/// Equal keys score 100 (including two empty keys); an empty key against a
/// non-empty one scores 0. The percentage is rounded half to even.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return MAX_SCORE;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.chars().count() + b.chars().count();
    let similarity = (2 * common_chars(a, b)) as f64 / total as f64;
    (similarity * MAX_SCORE as f64).round_ties_even() as u8
}

/// Token-sort ratio of two raw strings (0-100)
///
/// Symmetric, and independent of token order:
///
/// ```
/// use domsim_engine::domain::fuzzy::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("acme corp", "Corp-Acme"), 100);
/// assert_eq!(token_sort_ratio("abc", "xyz"), 0);
/// ```
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&token_sort_key(a), &token_sort_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello, World! "), "hello  world");
        assert_eq!(normalize("snake_case"), "snake_case");
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_keeps_other_scripts() {
        assert_eq!(normalize("Москва"), "москва");
        assert_eq!(normalize("東京-tower"), "東京 tower");
        // Latin-1 letters are dropped, not replaced
        assert_eq!(normalize("Zürich"), "zrich");
    }

    #[test]
    fn test_non_latin_names_are_not_equal() {
        // LCS "кв": 2 * 2 / 10
        assert_eq!(token_sort_ratio("москва", "киев"), 40);
        assert_eq!(token_sort_ratio("東京", "京都"), 50);
        assert!(token_sort_ratio("москва", "東京") < 85);
        assert_eq!(token_sort_ratio("Москва", "москва"), 100);
    }

    #[test]
    fn test_indel_distance_counts_characters() {
        assert_eq!(indel_distance("москва", "москв"), 1);
        assert_eq!(indel_distance("東京", ""), 2);
    }

    #[test]
    fn test_token_sort_key() {
        assert_eq!(token_sort_key("new-york times"), "new times york");
        assert_eq!(token_sort_key("B a"), "a b");
        assert_eq!(token_sort_key(""), "");
    }

    #[test]
    fn test_indel_distance() {
        assert_eq!(indel_distance("", ""), 0);
        assert_eq!(indel_distance("abc", ""), 3);
        assert_eq!(indel_distance("apple", "apples"), 1);
        // substitution costs a deletion plus an insertion
        assert_eq!(indel_distance("cat", "cut"), 2);
        assert_eq!(indel_distance("abc", "xyz"), 6);
    }

    #[test]
    fn test_ratio_self() {
        for name in ["apple", "a", "mail example", ""] {
            assert_eq!(ratio(name, name), 100);
        }
    }

    #[test]
    fn test_ratio_empty_side() {
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(ratio("abc", ""), 0);
    }

    #[test]
    fn test_ratio_values() {
        // 2 * 5 / 11 = 0.909...
        assert_eq!(ratio("apple", "apples"), 91);
        // 2 * 2 / 6 = 0.666...
        assert_eq!(ratio("cat", "cut"), 67);
        // 2 * 1 / 12 = 0.1666...
        assert_eq!(ratio("apples", "banana"), 17);
    }

    #[test]
    fn test_ratio_rounds_half_to_even() {
        // 2 * 1 / 8 = 0.25 -> 25 exactly
        assert_eq!(ratio("abcd", "axyz"), 25);
        // 2 * 3 / 16 = 0.375 -> 37.5 -> 38
        assert_eq!(ratio("abcdefgh", "abcxxxxx"), 38);
        // 2 * 1 / 16 = 0.125 -> 12.5 -> 12
        assert_eq!(ratio("abcdefgh", "azzzzzzz"), 12);
    }

    #[test]
    fn test_token_sort_ratio_symmetric() {
        let names = ["apple", "apples", "pineapple", "apple pie", "pie-apple", "x"];
        for a in names {
            for b in names {
                assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
            }
        }
    }

    #[test]
    fn test_token_sort_ratio_order_insensitive() {
        assert_eq!(token_sort_ratio("apple pie", "pie apple"), 100);
    }

    #[test]
    fn test_token_sort_ratio_monotonic() {
        let base = "abcdefgh";
        let one_edit = token_sort_ratio(base, "abcdefg");
        let two_edits = token_sort_ratio(base, "abcdef");
        let three_edits = token_sort_ratio(base, "abcde");
        assert!(one_edit >= two_edits);
        assert!(two_edits >= three_edits);
        assert!(one_edit < 100);
    }
}
