//! Summary statistics
//!
//! Plain aggregation over classifier and grouper output.

use crate::constants::REPORT_DECIMALS;
use crate::domain::pair::{SimilarityPair, round_to};
use serde::Serialize;

/// Statistics for one tier's pairs
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TierStatistics {
    /// Number of pairs
    pub count: usize,
    /// Mean shared-letter count, rounded to 2 decimals (0 when empty)
    pub mean_common_count: f64,
    /// Largest shared-letter count (0 when empty)
    pub max_common_count: usize,
}

impl TierStatistics {
    pub fn from_pairs(pairs: &[SimilarityPair<'_>]) -> Self {
        if pairs.is_empty() {
            return Self::default();
        }

        let total: usize = pairs.iter().map(|p| p.common_count).sum();
        let max = pairs.iter().map(|p| p.common_count).max().unwrap_or(0);

        Self {
            count: pairs.len(),
            mean_common_count: round_to(total as f64 / pairs.len() as f64, REPORT_DECIMALS),
            max_common_count: max,
        }
    }

    /// `(metric, value)` rows for the per-tier statistics table
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total pairs", self.count.to_string()),
            ("Mean common letters", self.mean_common_count.to_string()),
            ("Max common letters", self.max_common_count.to_string()),
        ]
    }
}

/// Run-wide counters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStatistics {
    pub total_domains: usize,
    pub unique_company_names: usize,
    pub perfect_pairs: usize,
    pub medium_pairs: usize,
    pub basic_pairs: usize,
    pub name_groups: usize,
    pub unique_tlds: usize,
}

impl SummaryStatistics {
    /// `(metric, value)` rows for the summary table
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total domains", self.total_domains.to_string()),
            ("Unique company names", self.unique_company_names.to_string()),
            ("Perfect pairs (4+ letters)", self.perfect_pairs.to_string()),
            ("Medium pairs (2-3 letters)", self.medium_pairs.to_string()),
            ("Basic pairs (1 letter)", self.basic_pairs.to_string()),
            ("Similar name groups", self.name_groups.to_string()),
            ("Unique TLDs", self.unique_tlds.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_statistics_empty() {
        let stats = TierStatistics::from_pairs(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean_common_count, 0.0);
        assert_eq!(stats.max_common_count, 0);
    }

    #[test]
    fn test_tier_statistics_values() {
        let pairs = vec![
            SimilarityPair::compare("abcde", "abcde", (0, 1)).unwrap(),
            SimilarityPair::compare("abcd", "abcd", (0, 2)).unwrap(),
            SimilarityPair::compare("abcd", "abcdx", (1, 2)).unwrap(),
        ];
        let stats = TierStatistics::from_pairs(&pairs);
        assert_eq!(stats.count, 3);
        // (5 + 4 + 4) / 3 = 4.333...
        assert_eq!(stats.mean_common_count, 4.33);
        assert_eq!(stats.max_common_count, 5);
    }

    #[test]
    fn test_tier_statistics_mean_tie_rounds_to_even() {
        let mut pairs = vec![SimilarityPair::compare("abcde", "abcde", (0, 1)).unwrap()];
        pairs.extend((0..7).map(|i| SimilarityPair::compare("abcd", "abcd", (1, i + 2)).unwrap()));
        let stats = TierStatistics::from_pairs(&pairs);
        // 33 / 8 = 4.125 exactly
        assert_eq!(stats.mean_common_count, 4.12);
    }

    #[test]
    fn test_summary_metrics_cover_all_counters() {
        let summary = SummaryStatistics {
            total_domains: 3,
            unique_company_names: 3,
            perfect_pairs: 3,
            medium_pairs: 0,
            basic_pairs: 0,
            name_groups: 2,
            unique_tlds: 1,
        };
        let metrics = summary.metrics();
        assert_eq!(metrics.len(), 7);
        assert_eq!(metrics[0], ("Total domains", "3".to_string()));
        assert_eq!(metrics[5], ("Similar name groups", "2".to_string()));
    }
}
