//! The aligned dataset table: timestamps, three physical series, and the
//! anomaly label column.

use crate::error::{Result, SynthError};
use chrono::{DateTime, Utc};
use std::fmt;

/// Anomaly category code. `0` means no anomaly.
pub type AnomalyLabel = u8;

/// Label value for points without an injected anomaly.
pub const NO_ANOMALY: AnomalyLabel = 0;

/// Monitored physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    Pressure,
    Power,
}

impl Quantity {
    /// All quantities in column and injection order.
    pub const ALL: [Quantity; 3] = [Quantity::Temperature, Quantity::Pressure, Quantity::Power];

    /// Anomaly category code written to the label column.
    pub fn code(self) -> AnomalyLabel {
        match self {
            Quantity::Temperature => 1,
            Quantity::Pressure => 2,
            Quantity::Power => 3,
        }
    }

    /// Inverse of [`Quantity::code`].
    pub fn from_code(code: AnomalyLabel) -> Option<Self> {
        match code {
            1 => Some(Quantity::Temperature),
            2 => Some(Quantity::Pressure),
            3 => Some(Quantity::Power),
            _ => None,
        }
    }

    /// Position of this quantity in column order.
    pub fn index(self) -> usize {
        match self {
            Quantity::Temperature => 0,
            Quantity::Pressure => 1,
            Quantity::Power => 2,
        }
    }

    /// Column name used in the exported table.
    pub fn column_name(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "pressure",
            Quantity::Power => "power",
        }
    }

    /// Human-readable title with unit.
    pub fn title(self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperature (°C)",
            Quantity::Pressure => "Pressure (kPa)",
            Quantity::Power => "Power Consumption (kW)",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One positionally aligned row of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetRow {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub pressure: f64,
    pub power: f64,
    pub anomaly: AnomalyLabel,
}

/// Timestamps, one series per [`Quantity`], and the label column, all of
/// the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    timestamps: Vec<DateTime<Utc>>,
    /// Indexed by [`Quantity::index`].
    series: [Vec<f64>; 3],
    labels: Vec<AnomalyLabel>,
}

impl Dataset {
    /// Assemble a table with an all-zero label column.
    pub fn new(timestamps: Vec<DateTime<Utc>>, series: [Vec<f64>; 3]) -> Result<Self> {
        let labels = vec![NO_ANOMALY; timestamps.len()];
        Self::with_labels(timestamps, series, labels)
    }

    /// Assemble a table from existing columns.
    pub fn with_labels(
        timestamps: Vec<DateTime<Utc>>,
        series: [Vec<f64>; 3],
        labels: Vec<AnomalyLabel>,
    ) -> Result<Self> {
        if timestamps.is_empty() {
            return Err(SynthError::EmptyData);
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(SynthError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        for column in series.iter() {
            if column.len() != timestamps.len() {
                return Err(SynthError::DimensionMismatch {
                    expected: timestamps.len(),
                    got: column.len(),
                });
            }
        }

        if labels.len() != timestamps.len() {
            return Err(SynthError::DimensionMismatch {
                expected: timestamps.len(),
                got: labels.len(),
            });
        }

        Ok(Self {
            timestamps,
            series,
            labels,
        })
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Values of one quantity.
    pub fn series(&self, quantity: Quantity) -> &[f64] {
        &self.series[quantity.index()]
    }

    pub fn labels(&self) -> &[AnomalyLabel] {
        &self.labels
    }

    /// Borrow one series mutably together with the shared label column.
    ///
    /// This is the only mutable access to the table; anomaly injection
    /// goes through it.
    pub fn series_and_labels_mut(
        &mut self,
        quantity: Quantity,
    ) -> (&mut [f64], &mut [AnomalyLabel]) {
        (
            self.series[quantity.index()].as_mut_slice(),
            self.labels.as_mut_slice(),
        )
    }

    /// Get a row by position.
    pub fn row(&self, index: usize) -> Result<DatasetRow> {
        if index >= self.len() {
            return Err(SynthError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(DatasetRow {
            timestamp: self.timestamps[index],
            temperature: self.series[0][index],
            pressure: self.series[1][index],
            power: self.series[2][index],
            anomaly: self.labels[index],
        })
    }

    /// Iterate rows in timestamp order.
    pub fn rows(&self) -> impl Iterator<Item = DatasetRow> + '_ {
        (0..self.len()).map(move |i| DatasetRow {
            timestamp: self.timestamps[i],
            temperature: self.series[0][i],
            pressure: self.series[1][i],
            power: self.series[2][i],
            anomaly: self.labels[i],
        })
    }

    /// Indices whose label carries `quantity`'s category code.
    pub fn anomaly_indices(&self, quantity: Quantity) -> Vec<usize> {
        let code = quantity.code();
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == code)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of rows with any nonzero label.
    pub fn anomaly_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l != NO_ANOMALY).count()
    }

    /// Copy of the first `len` rows (or all rows if shorter).
    pub fn window(&self, len: usize) -> Dataset {
        let end = len.min(self.len());
        Dataset {
            timestamps: self.timestamps[..end].to_vec(),
            series: [
                self.series[0][..end].to_vec(),
                self.series[1][..end].to_vec(),
                self.series[2][..end].to_vec(),
            ],
            labels: self.labels[..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::minutes(i as i64)).collect()
    }

    fn make_dataset(n: usize) -> Dataset {
        let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let p = vec![100.0; n];
        let w = vec![50.0; n];
        Dataset::new(make_timestamps(n), [t, p, w]).unwrap()
    }

    #[test]
    fn quantity_codes_round_trip() {
        for q in Quantity::ALL {
            assert_eq!(Quantity::from_code(q.code()), Some(q));
        }
        assert_eq!(Quantity::from_code(0), None);
        assert_eq!(Quantity::from_code(4), None);
        assert_eq!(Quantity::Power.code(), 3);
    }

    #[test]
    fn new_dataset_has_clean_labels() {
        let ds = make_dataset(5);
        assert_eq!(ds.len(), 5);
        assert!(ds.labels().iter().all(|&l| l == NO_ANOMALY));
        assert_eq!(ds.anomaly_count(), 0);
    }

    #[test]
    fn rejects_misaligned_series() {
        let result = Dataset::new(
            make_timestamps(3),
            [vec![1.0; 3], vec![1.0; 2], vec![1.0; 3]],
        );
        assert_eq!(
            result.unwrap_err(),
            SynthError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn rejects_misaligned_labels() {
        let result = Dataset::with_labels(
            make_timestamps(3),
            [vec![1.0; 3], vec![1.0; 3], vec![1.0; 3]],
            vec![0; 4],
        );
        assert!(matches!(result, Err(SynthError::DimensionMismatch { .. })));
    }

    #[test]
    fn rejects_unordered_timestamps() {
        let mut ts = make_timestamps(3);
        ts.swap(0, 2);
        let result = Dataset::new(ts, [vec![1.0; 3], vec![1.0; 3], vec![1.0; 3]]);
        assert!(matches!(result, Err(SynthError::TimestampError(_))));
    }

    #[test]
    fn rejects_empty_table() {
        let result = Dataset::new(vec![], [vec![], vec![], vec![]]);
        assert_eq!(result.unwrap_err(), SynthError::EmptyData);
    }

    #[test]
    fn mutation_through_shared_labels() {
        let mut ds = make_dataset(4);
        {
            let (series, labels) = ds.series_and_labels_mut(Quantity::Pressure);
            series[2] += 1.5;
            labels[2] = Quantity::Pressure.code();
        }
        assert_eq!(ds.series(Quantity::Pressure)[2], 101.5);
        assert_eq!(ds.anomaly_indices(Quantity::Pressure), vec![2]);
        assert!(ds.anomaly_indices(Quantity::Temperature).is_empty());
    }

    #[test]
    fn row_access() {
        let ds = make_dataset(4);
        let row = ds.row(3).unwrap();
        assert_eq!(row.temperature, 3.0);
        assert_eq!(row.pressure, 100.0);
        assert_eq!(row.anomaly, 0);
        assert!(matches!(
            ds.row(4),
            Err(SynthError::IndexOutOfBounds { index: 4, size: 4 })
        ));
        assert_eq!(ds.rows().count(), 4);
    }

    #[test]
    fn window_truncates() {
        let ds = make_dataset(10);
        let w = ds.window(4);
        assert_eq!(w.len(), 4);
        assert_eq!(w.series(Quantity::Temperature), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ds.window(100).len(), 10);
    }
}
