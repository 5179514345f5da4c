//! domsim-engine - Similarity analysis for domain name lists
//!
//! This crate provides functionality to:
//! - Classify every pair of domains into tiers by the number of shared letters
//! - Group company names derived from the domains by fuzzy token-sort similarity
//! - Load domain lists from columnar files and export the results as tables

pub mod app;
pub mod constants;
pub mod domain;
pub mod infra;

// Re-export commonly used types
pub use app::analysis::{AnalysisOptions, AnalysisReport, analyze};
pub use app::cancel::Cancelled;
pub use app::classifier::{LetterClassification, classify, classify_parallel};
pub use app::grouper::{GroupOptions, NameGroup, NameGroups, group_names};
pub use constants::*;
pub use domain::company::extract_company_name;
pub use domain::fuzzy::token_sort_ratio;
pub use domain::pair::SimilarityPair;
pub use domain::tier::SimilarityTier;
pub use infra::domain_source::{DomainDataset, LoadError, load_domains};
pub use infra::report_io::{ExportError, export_report};
