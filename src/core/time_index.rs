//! Uniform timestamp index and the integer offsets used by signal math.

use crate::error::{Result, SynthError};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Minutes in one day.
pub const MINUTES_PER_DAY: usize = 24 * 60;

/// Minutes in one week.
pub const MINUTES_PER_WEEK: usize = 7 * MINUTES_PER_DAY;

/// Minutes in one non-leap year.
pub const MINUTES_PER_YEAR: usize = 365 * MINUTES_PER_DAY;

/// An ordered, uniformly spaced sequence of timestamps together with the
/// offsets `0..N` that drive every periodic component.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndex {
    timestamps: Vec<DateTime<Utc>>,
    offsets: Vec<usize>,
}

impl TimeIndex {
    /// Build an index of `periods` timestamps starting at `start`, spaced by `step`.
    pub fn new(start: DateTime<Utc>, periods: usize, step: Duration) -> Result<Self> {
        if periods == 0 {
            return Err(SynthError::InvalidParameter(
                "periods must be positive".to_string(),
            ));
        }
        if step <= Duration::zero() {
            return Err(SynthError::InvalidParameter(
                "step must be positive".to_string(),
            ));
        }

        let timestamps: Vec<DateTime<Utc>> = (0..periods)
            .map(|i| start + step * i as i32)
            .collect();
        let offsets: Vec<usize> = (0..periods).collect();

        Ok(Self {
            timestamps,
            offsets,
        })
    }

    /// `periods` one-minute steps starting at midnight UTC on January 1st
    /// of `year`.
    ///
    /// The length does not depend on the calendar: a full year is
    /// [`MINUTES_PER_YEAR`] steps, leap years included.
    pub fn starting_year(year: i32, periods: usize) -> Result<Self> {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| SynthError::TimestampError(format!("invalid year {year}")))?;
        Self::new(start, periods, Duration::minutes(1))
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false for a constructed index.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.timestamps[0]
    }

    /// Consume the index, keeping only the timestamps.
    pub fn into_timestamps(self) -> Vec<DateTime<Utc>> {
        self.timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn year_index_has_one_entry_per_minute() {
        let index = TimeIndex::starting_year(2025, MINUTES_PER_YEAR).unwrap();
        assert_eq!(index.len(), 525_600);
        assert_eq!(index.offsets().len(), index.len());
        assert_eq!(index.start(), start());
        assert_eq!(
            *index.timestamps().last().unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap()
        );
    }

    #[test]
    fn spacing_is_uniform() {
        let index = TimeIndex::starting_year(2025, MINUTES_PER_YEAR).unwrap();
        assert!(index
            .timestamps()
            .windows(2)
            .all(|w| w[1] - w[0] == Duration::minutes(1)));
    }

    #[test]
    fn offsets_count_from_zero() {
        let index = TimeIndex::new(start(), 5, Duration::minutes(1)).unwrap();
        assert_eq!(index.offsets(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn custom_step() {
        let index = TimeIndex::new(start(), 3, Duration::hours(1)).unwrap();
        assert_eq!(index.timestamps()[2], start() + Duration::hours(2));
    }

    #[test]
    fn rejects_zero_periods() {
        assert!(matches!(
            TimeIndex::new(start(), 0, Duration::minutes(1)),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(TimeIndex::new(start(), 3, Duration::zero()).is_err());
        assert!(TimeIndex::new(start(), 3, Duration::minutes(-1)).is_err());
    }

    #[test]
    fn short_index_from_year_start() {
        let index = TimeIndex::starting_year(2030, 3).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.start(), Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(
            TimeIndex::starting_year(2030, 0),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn unrepresentable_year_fails() {
        assert!(matches!(
            TimeIndex::starting_year(i32::MAX, 10),
            Err(SynthError::TimestampError(_))
        ));
    }

    #[test]
    fn leap_year_keeps_fixed_length() {
        let index = TimeIndex::starting_year(2024, MINUTES_PER_YEAR).unwrap();
        assert_eq!(index.len(), MINUTES_PER_YEAR);
    }
}
