//! Full analysis workflow
//!
//! Runs the letter classifier and the name grouper concurrently over the same
//! domain list and aggregates their results into one immutable report.

use crate::app::cancel::Cancelled;
use crate::app::classifier::{ClassifyOptions, LetterClassification, classify_with_options};
use crate::app::grouper::{GroupOptions, NameGroups, group_names};
use crate::constants::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_SIMILARITY_THRESHOLD};
use crate::domain::company::unique_company_names;
use crate::domain::patterns::{DomainPattern, count_unique_tlds};
use crate::domain::stats::{SummaryStatistics, TierStatistics};
use crate::domain::tier::SimilarityTier;
use std::sync::atomic::AtomicBool;
use tracing::info;

/// Everything produced by one analysis run
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport<'a> {
    /// Distinct company names in first-occurrence order
    pub company_names: Vec<String>,
    pub classification: LetterClassification<'a>,
    pub groups: NameGroups,
    pub domain_patterns: Vec<DomainPattern>,
    pub summary: SummaryStatistics,
}

impl AnalysisReport<'_> {
    /// Statistics of one tier
    pub fn tier_statistics(&self, tier: SimilarityTier) -> TierStatistics {
        self.classification.statistics(tier)
    }
}

/// Options for a full analysis run
pub struct AnalysisOptions<'c, F = fn(u64, u64)> {
    /// Minimum fuzzy score for group membership
    pub threshold: u8,
    /// Candidates examined per anchor
    pub candidate_limit: usize,
    /// Row shards for the classifier (0 = automatic)
    pub shards: usize,
    /// Raised by the caller to stop both stages
    pub cancel: Option<&'c AtomicBool>,
    /// Classifier progress callback (pairs done, pairs total)
    pub on_progress: Option<F>,
}

impl Default for AnalysisOptions<'_, fn(u64, u64)> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            shards: 0,
            cancel: None,
            on_progress: None,
        }
    }
}

impl<'c, F> AnalysisOptions<'c, F> {
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_candidate_limit(mut self, candidate_limit: usize) -> Self {
        self.candidate_limit = candidate_limit;
        self
    }

    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    pub fn with_cancel(mut self, cancel: &'c AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Set the classifier progress callback
    pub fn with_progress<G>(self, callback: G) -> AnalysisOptions<'c, G> {
        AnalysisOptions {
            threshold: self.threshold,
            candidate_limit: self.candidate_limit,
            shards: self.shards,
            cancel: self.cancel,
            on_progress: Some(callback),
        }
    }

    fn split(self) -> (ClassifyOptions<'c, F>, GroupOptions<'c>) {
        let classify = ClassifyOptions {
            shards: self.shards,
            cancel: self.cancel,
            on_progress: self.on_progress,
        };
        let group = GroupOptions {
            threshold: self.threshold,
            candidate_limit: self.candidate_limit,
            cancel: self.cancel,
        };
        (classify, group)
    }
}

/// Run the complete analysis
///
/// The classifier and the grouper share no state and run on separate rayon
/// tasks; each returns its own result.
pub fn analyze<'a, S, F>(
    domains: &'a [S],
    options: AnalysisOptions<'_, F>,
) -> Result<AnalysisReport<'a>, Cancelled>
where
    S: AsRef<str> + Sync,
    F: Fn(u64, u64) + Sync + Send,
{
    let company_names = unique_company_names(domains);
    info!(
        domains = domains.len(),
        companies = company_names.len(),
        "starting analysis"
    );

    let (classify_options, group_options) = options.split();

    let (classification, groups) = rayon::join(
        || classify_with_options(domains, classify_options),
        || group_names(&company_names, &group_options),
    );
    let classification = classification?;
    let groups = groups?;

    let domain_patterns: Vec<DomainPattern> = domains
        .iter()
        .map(|d| DomainPattern::from_domain(d.as_ref()))
        .collect();

    let summary = SummaryStatistics {
        total_domains: domains.len(),
        unique_company_names: company_names.len(),
        perfect_pairs: classification.perfect.len(),
        medium_pairs: classification.medium.len(),
        basic_pairs: classification.basic.len(),
        name_groups: groups.len(),
        unique_tlds: count_unique_tlds(domains),
    };

    info!(?summary, "analysis complete");

    Ok(AnalysisReport {
        company_names,
        classification,
        groups,
        domain_patterns,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_empty() {
        let domains: Vec<String> = vec![];
        let report = analyze(&domains, AnalysisOptions::default()).unwrap();
        assert!(report.classification.is_empty());
        assert!(report.groups.is_empty());
        assert_eq!(report.summary, SummaryStatistics::default());
    }

    #[test]
    fn test_analyze_counts() {
        let domains = ["apple.com", "apples.com", "banana.com"];
        let report = analyze(&domains, AnalysisOptions::default()).unwrap();

        assert_eq!(report.company_names, vec!["apple", "apples", "banana"]);
        assert_eq!(report.summary.total_domains, 3);
        assert_eq!(report.summary.unique_company_names, 3);
        assert_eq!(report.summary.perfect_pairs, 3);
        assert_eq!(report.summary.name_groups, 2);
        assert_eq!(report.summary.unique_tlds, 1);
        assert_eq!(report.domain_patterns.len(), 3);
    }

    #[test]
    fn test_analyze_cancelled() {
        let domains = ["apple.com", "apples.com"];
        let cancel = AtomicBool::new(true);
        let result = analyze(&domains, AnalysisOptions::default().with_cancel(&cancel));
        assert!(matches!(result, Err(Cancelled)));
    }

    #[test]
    fn test_analyze_threshold_passed_to_grouper() {
        let domains = ["apple.com", "apples.com"];
        let report = analyze(&domains, AnalysisOptions::default().with_threshold(95)).unwrap();
        assert!(report.groups.is_empty());
    }
}
