//! Core data structures: the time index and the aligned dataset table.

mod dataset;
mod time_index;

pub use dataset::{AnomalyLabel, Dataset, DatasetRow, Quantity, NO_ANOMALY};
pub use time_index::{TimeIndex, MINUTES_PER_DAY, MINUTES_PER_WEEK, MINUTES_PER_YEAR};
