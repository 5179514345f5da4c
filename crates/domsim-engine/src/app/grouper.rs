//! Fuzzy company-name grouping workflow
//!
//! Every distinct name acts as an anchor and is scored against all names
//! (itself included) with the token-sort ratio. Only the best
//! `candidate_limit` candidates are examined; from those the anchor itself
//! and anything below `threshold` are removed.
//!
//! Groups are computed per anchor and never merged: `a` may list `b` while
//! `b` does not list `a`, because each anchor has its own candidate window.

use crate::app::cancel::{Cancelled, check};
use crate::constants::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_SIMILARITY_THRESHOLD};
use crate::domain::fuzzy::{ratio, token_sort_key};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::atomic::AtomicBool;
use tracing::{debug, info};

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashSet as HashSet;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet;

/// A candidate name and its score against the anchor
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameMatch {
    pub name: String,
    pub score: u8,
}

/// Names similar to one anchor, best first
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameGroup {
    pub anchor: String,
    /// Never empty, never contains the anchor
    pub members: Vec<NameMatch>,
}

impl NameGroup {
    /// Member names without scores
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

/// All emitted groups, in anchor input order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameGroups {
    groups: Vec<NameGroup>,
}

impl NameGroups {
    /// Group keyed by the given anchor
    pub fn get(&self, anchor: &str) -> Option<&NameGroup> {
        self.groups.iter().find(|g| g.anchor == anchor)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_vec(self) -> Vec<NameGroup> {
        self.groups
    }
}

impl<'g> IntoIterator for &'g NameGroups {
    type Item = &'g NameGroup;
    type IntoIter = std::slice::Iter<'g, NameGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Options for name grouping
#[derive(Clone, Copy, Debug)]
pub struct GroupOptions<'c> {
    /// Minimum score for membership (0-100)
    pub threshold: u8,
    /// Candidates examined per anchor, anchor included
    pub candidate_limit: usize,
    /// Raised by the caller to stop early
    pub cancel: Option<&'c AtomicBool>,
}

impl Default for GroupOptions<'_> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            cancel: None,
        }
    }
}

impl<'c> GroupOptions<'c> {
    /// Set the membership threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the per-anchor candidate window
    pub fn with_candidate_limit(mut self, candidate_limit: usize) -> Self {
        self.candidate_limit = candidate_limit;
        self
    }

    /// Set the cancellation flag
    pub fn with_cancel(mut self, cancel: &'c AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Group similar names
///
/// Empty names are ignored and duplicates are considered once.
pub fn group_names<S: AsRef<str>>(
    names: &[S],
    options: &GroupOptions<'_>,
) -> Result<NameGroups, Cancelled> {
    let names = distinct_names(names);
    info!(
        names = names.len(),
        threshold = options.threshold,
        candidate_limit = options.candidate_limit,
        "grouping company names"
    );

    let keys: Vec<String> = names.iter().map(|n| token_sort_key(n)).collect();

    let groups: Vec<Option<NameGroup>> = (0..names.len())
        .into_par_iter()
        .map(|anchor| {
            check(options.cancel)?;
            Ok::<_, Cancelled>(group_for_anchor(&names, &keys, anchor, options))
        })
        .collect::<Result<_, _>>()?;

    let groups: Vec<NameGroup> = groups.into_iter().flatten().collect();
    info!(groups = groups.len(), "name grouping complete");

    Ok(NameGroups { groups })
}

/// Scores of every name against `anchor`, best first, limited to the window
///
/// Ties keep input order.
pub fn ranked_candidates(keys: &[String], anchor: usize, limit: usize) -> Vec<(usize, u8)> {
    let mut scored: Vec<(usize, u8)> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| (i, ratio(&keys[anchor], key)))
        .collect();

    scored.sort_by_key(|&(_, score)| Reverse(score));
    scored.truncate(limit);
    scored
}

fn group_for_anchor(
    names: &[&str],
    keys: &[String],
    anchor: usize,
    options: &GroupOptions<'_>,
) -> Option<NameGroup> {
    let members: Vec<NameMatch> = ranked_candidates(keys, anchor, options.candidate_limit)
        .into_iter()
        .filter(|&(i, score)| i != anchor && score >= options.threshold)
        .map(|(i, score)| NameMatch {
            name: names[i].to_string(),
            score,
        })
        .collect();

    if members.is_empty() {
        return None;
    }

    debug!(anchor = names[anchor], members = members.len(), "name group");
    Some(NameGroup {
        anchor: names[anchor].to_string(),
        members,
    })
}

fn distinct_names<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::default();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .collect()
}
