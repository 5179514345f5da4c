//! Similarity analysis constants
//!
//! Tier boundaries are fixed policy and intentionally not configurable.

// =============================================================================
// Letter tier boundaries
// =============================================================================

/// Minimum shared letters for the Perfect tier
pub const PERFECT_MIN_COMMON: usize = 4;

/// Minimum shared letters for the Medium tier (upper bound is PERFECT_MIN_COMMON - 1)
pub const MEDIUM_MIN_COMMON: usize = 2;

/// Shared letters for the Basic tier
pub const BASIC_COMMON: usize = 1;

// =============================================================================
// Fuzzy grouping parameters
// =============================================================================

/// Maximum fuzzy score
pub const MAX_SCORE: u8 = 100;

/// Default minimum score for a name to join a group (0-100)
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 85;

/// Default number of best-scoring candidates examined per anchor
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

// =============================================================================
// Reporting
// =============================================================================

/// Decimal places for similarity percentages and means
pub const REPORT_DECIMALS: i32 = 2;

/// Separator between letters in the common-letters column
pub const LETTER_SEPARATOR: &str = ", ";

/// Separator between names and scores in the name-groups table
pub const LIST_SEPARATOR: &str = "; ";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "domsim_results";

/// Name-groups table file name
pub const NAME_GROUPS_FILE: &str = "name_groups.csv";

/// Domain structure table file name
pub const DOMAIN_STRUCTURE_FILE: &str = "domain_structure.csv";

/// Summary statistics table file name
pub const SUMMARY_STATISTICS_FILE: &str = "summary_statistics.csv";

/// Summary JSON file name
pub const SUMMARY_JSON_FILE: &str = "summary.json";

/// Column name used for line-oriented input
pub const LINE_INPUT_COLUMN: &str = "domain";
