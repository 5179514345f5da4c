//! Application layer - analysis workflows
//!
//! Combines the pure domain logic into the classifier, grouper and full analysis runs.

pub mod analysis;
pub mod cancel;
pub mod classifier;
pub mod grouper;
