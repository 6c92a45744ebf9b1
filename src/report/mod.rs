//! Report module - run summary and statistics export

pub mod stats_export;
pub mod summary;

pub use stats_export::*;
pub use summary::*;
