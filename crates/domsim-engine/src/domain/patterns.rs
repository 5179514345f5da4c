//! Domain structure patterns

use serde::Serialize;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashSet as HashSet;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet;

/// Structural breakdown of a single domain
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DomainPattern {
    pub domain: String,
    /// Last `.`-separated label, as written
    pub tld: String,
    /// Labels beyond the first two
    pub subdomain_count: usize,
    /// Length in characters
    pub length: usize,
}

impl DomainPattern {
    pub fn from_domain(domain: &str) -> Self {
        let labels: Vec<&str> = domain.split('.').collect();

        Self {
            domain: domain.to_string(),
            tld: top_level_suffix(domain).to_string(),
            subdomain_count: labels.len().saturating_sub(2),
            length: domain.chars().count(),
        }
    }
}

/// Last `.`-separated label of a domain
pub fn top_level_suffix(domain: &str) -> &str {
    domain.rsplit('.').next().unwrap_or(domain)
}

/// Number of distinct top-level suffixes
pub fn count_unique_tlds<S: AsRef<str>>(domains: &[S]) -> usize {
    let tlds: HashSet<&str> = domains
        .iter()
        .map(|d| top_level_suffix(d.as_ref()))
        .collect();
    tlds.len()
}
