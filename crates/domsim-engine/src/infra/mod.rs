//! Infrastructure layer - file formats
//!
//! Reading domain lists and writing result tables.

pub mod domain_source;
pub mod report_io;
