//! Utility functions.

pub mod stats;

pub use stats::{summarize, RunningStats, SummaryStatistics};
