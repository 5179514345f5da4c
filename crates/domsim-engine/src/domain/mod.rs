//! Domain layer - letters, tiers, fuzzy scoring and statistics
//!
//! Everything here is pure and free of I/O.

pub mod company;
pub mod fuzzy;
pub mod letters;
pub mod pair;
pub mod patterns;
pub mod stats;
pub mod tier;
