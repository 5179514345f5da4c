//! Similarity tiers
//!
//! A pair of domains is assigned to a tier by the number of distinct
//! letters they share. Pairs sharing nothing belong to no tier.

use crate::constants::{BASIC_COMMON, MEDIUM_MIN_COMMON, PERFECT_MIN_COMMON};
use serde::Serialize;
use std::fmt;

/// Letter-overlap tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityTier {
    /// 4 or more shared letters
    Perfect,
    /// 2 or 3 shared letters
    Medium,
    /// Exactly 1 shared letter
    Basic,
}

impl SimilarityTier {
    /// All tiers, strongest first
    pub const ALL: [SimilarityTier; 3] = [Self::Perfect, Self::Medium, Self::Basic];

    /// Route a shared-letter count to its tier
    ///
    /// Returns `None` for zero shared letters.
    #[inline]
    pub fn from_common_count(common_count: usize) -> Option<Self> {
        if common_count >= PERFECT_MIN_COMMON {
            Some(Self::Perfect)
        } else if common_count >= MEDIUM_MIN_COMMON {
            Some(Self::Medium)
        } else if common_count == BASIC_COMMON {
            Some(Self::Basic)
        } else {
            None
        }
    }

    /// Lowercase name used in file names and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Medium => "medium",
            Self::Basic => "basic",
        }
    }

    /// Human-readable description of the tier boundary
    pub fn description(self) -> &'static str {
        match self {
            Self::Perfect => "4+ common letters",
            Self::Medium => "2-3 common letters",
            Self::Basic => "1 common letter",
        }
    }
}

impl fmt::Display for SimilarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
