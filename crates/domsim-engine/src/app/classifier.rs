//! Pairwise letter classification workflow
//!
//! Enumerates every unordered pair of input positions `(i < j)`, intersects
//! their letter sets and routes each pair to a tier. Duplicate domains are
//! compared as independent occurrences.
//!
//! Within a tier, pairs are reported by descending shared-letter count; ties
//! keep enumeration order. The parallel path shards the row range and
//! re-sorts the merged tiers, so it returns exactly what the sequential path
//! returns.

use crate::app::cancel::{Cancelled, check};
use crate::domain::letters::LetterSet;
use crate::domain::pair::SimilarityPair;
use crate::domain::stats::TierStatistics;
use crate::domain::tier::SimilarityTier;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::convert::Infallible;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info};

/// Classified domain pairs, one ordered list per tier
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LetterClassification<'a> {
    pub perfect: Vec<SimilarityPair<'a>>,
    pub medium: Vec<SimilarityPair<'a>>,
    pub basic: Vec<SimilarityPair<'a>>,
}

impl<'a> LetterClassification<'a> {
    /// Pairs of one tier, in reporting order
    pub fn pairs(&self, tier: SimilarityTier) -> &[SimilarityPair<'a>] {
        match tier {
            SimilarityTier::Perfect => &self.perfect,
            SimilarityTier::Medium => &self.medium,
            SimilarityTier::Basic => &self.basic,
        }
    }

    fn pairs_mut(&mut self, tier: SimilarityTier) -> &mut Vec<SimilarityPair<'a>> {
        match tier {
            SimilarityTier::Perfect => &mut self.perfect,
            SimilarityTier::Medium => &mut self.medium,
            SimilarityTier::Basic => &mut self.basic,
        }
    }

    /// Total number of classified pairs across all tiers
    pub fn len(&self) -> usize {
        self.perfect.len() + self.medium.len() + self.basic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Statistics of one tier
    pub fn statistics(&self, tier: SimilarityTier) -> TierStatistics {
        TierStatistics::from_pairs(self.pairs(tier))
    }

    /// Tiers paired with their pairs, strongest first
    pub fn iter(&self) -> impl Iterator<Item = (SimilarityTier, &[SimilarityPair<'a>])> {
        SimilarityTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.pairs(tier)))
    }

    fn push(&mut self, pair: SimilarityPair<'a>) {
        if let Some(tier) = pair.tier() {
            self.pairs_mut(tier).push(pair);
        }
    }

    fn append(&mut self, other: &mut LetterClassification<'a>) {
        self.perfect.append(&mut other.perfect);
        self.medium.append(&mut other.medium);
        self.basic.append(&mut other.basic);
    }
}

/// Options for parallel classification
pub struct ClassifyOptions<'c, F = fn(u64, u64)> {
    /// Number of row shards (0 = derived from the rayon pool size)
    pub shards: usize,
    /// Raised by the caller to stop early
    pub cancel: Option<&'c AtomicBool>,
    /// Progress callback (pairs done, pairs total)
    pub on_progress: Option<F>,
}

impl Default for ClassifyOptions<'_, fn(u64, u64)> {
    fn default() -> Self {
        Self {
            shards: 0,
            cancel: None,
            on_progress: None,
        }
    }
}

impl<'c, F> ClassifyOptions<'c, F> {
    /// Set the shard count
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Set the cancellation flag
    pub fn with_cancel(mut self, cancel: &'c AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Set the progress callback
    pub fn with_progress<G>(self, callback: G) -> ClassifyOptions<'c, G> {
        ClassifyOptions {
            shards: self.shards,
            cancel: self.cancel,
            on_progress: Some(callback),
        }
    }
}

/// Number of unordered position pairs for `n` domains
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Classify all domain pairs on the current thread
pub fn classify<S: AsRef<str>>(domains: &[S]) -> LetterClassification<'_> {
    let letters = letter_sets(domains);
    let mut result = LetterClassification::default();

    for i in 0..domains.len() {
        classify_row(domains, &letters, i, &mut result);
    }

    // Stable: equal counts keep enumeration order
    for tier in SimilarityTier::ALL {
        result
            .pairs_mut(tier)
            .sort_by_key(|pair| Reverse(pair.common_count));
    }

    result
}

/// Classify all domain pairs using the rayon pool
pub fn classify_parallel<S: AsRef<str> + Sync>(domains: &[S]) -> LetterClassification<'_> {
    let Ok(result) = classify_sharded(domains, 0, None::<fn(u64, u64)>, || {
        Ok::<(), Infallible>(())
    });
    result
}

/// Classify all domain pairs with sharding, progress and cancellation
pub fn classify_with_options<'a, S, F>(
    domains: &'a [S],
    options: ClassifyOptions<'_, F>,
) -> Result<LetterClassification<'a>, Cancelled>
where
    S: AsRef<str> + Sync,
    F: Fn(u64, u64) + Sync,
{
    let ClassifyOptions {
        shards,
        cancel,
        on_progress,
    } = options;

    classify_sharded(domains, shards, on_progress, || check(cancel))
}

/// Sharded classification; `keep_going` runs before every row
fn classify_sharded<'a, S, F, E>(
    domains: &'a [S],
    shards: usize,
    on_progress: Option<F>,
    keep_going: impl Fn() -> Result<(), E> + Sync,
) -> Result<LetterClassification<'a>, E>
where
    S: AsRef<str> + Sync,
    F: Fn(u64, u64) + Sync,
    E: Send,
{
    let n = domains.len();
    let total = pair_count(n);
    let shards = if shards == 0 {
        rayon::current_num_threads() * 4
    } else {
        shards
    };

    info!(domains = n, pairs = total, "classifying domain pairs");

    let letters = letter_sets(domains);
    let ranges = shard_rows(n, shards);
    let done = AtomicU64::new(0);

    let partials: Vec<LetterClassification<'a>> = ranges
        .into_par_iter()
        .map(|rows| {
            debug!(start = rows.start, end = rows.end, "classifying shard");
            let mut partial = LetterClassification::default();

            for i in rows {
                keep_going()?;
                classify_row(domains, &letters, i, &mut partial);

                if let Some(ref callback) = on_progress {
                    let row_pairs = (n - 1 - i) as u64;
                    let current = done.fetch_add(row_pairs, Ordering::Relaxed) + row_pairs;
                    callback(current, total);
                }
            }

            Ok::<_, E>(partial)
        })
        .collect::<Result<_, E>>()?;

    let mut result = LetterClassification::default();
    for mut partial in partials {
        result.append(&mut partial);
    }

    // Keys are unique per pair, so an unstable sort is deterministic
    for tier in SimilarityTier::ALL {
        result
            .pairs_mut(tier)
            .par_sort_unstable_by_key(|pair| pair.report_key());
    }

    info!(
        perfect = result.perfect.len(),
        medium = result.medium.len(),
        basic = result.basic.len(),
        "classification complete"
    );

    Ok(result)
}

/// Split rows `[0, n)` into at most `shards` ranges of similar pair counts
///
/// Row `i` holds `n - 1 - i` pairs, so early rows are heavier.
pub fn shard_rows(n: usize, shards: usize) -> Vec<Range<usize>> {
    if n < 2 {
        return Vec::new();
    }

    let shards = shards.max(1) as u64;
    let target = pair_count(n).div_ceil(shards).max(1);

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut acc = 0u64;

    // The last row has no pairs
    for i in 0..n - 1 {
        acc += (n - 1 - i) as u64;
        if acc >= target {
            ranges.push(start..i + 1);
            start = i + 1;
            acc = 0;
        }
    }

    if start < n - 1 {
        ranges.push(start..n - 1);
    }

    ranges
}

fn letter_sets<S: AsRef<str>>(domains: &[S]) -> Vec<LetterSet> {
    domains
        .iter()
        .map(|d| LetterSet::from_str_lowercase(d.as_ref()))
        .collect()
}

fn classify_row<'a, S: AsRef<str>>(
    domains: &'a [S],
    letters: &[LetterSet],
    i: usize,
    out: &mut LetterClassification<'a>,
) {
    let domain_a = domains[i].as_ref();
    for j in i + 1..domains.len() {
        if let Some(pair) = SimilarityPair::from_letter_sets(
            domain_a,
            domains[j].as_ref(),
            &letters[i],
            &letters[j],
            (i, j),
        ) {
            out.push(pair);
        }
    }
}
