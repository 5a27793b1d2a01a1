//! Row-oriented CSV export of the dataset table.
//!
//! Header: `timestamp,temperature,pressure,power,anomaly`, one row per
//! timestamp, timestamps rendered as `YYYY-MM-DD HH:MM:SS`.

use crate::core::{AnomalyLabel, Dataset, DatasetRow, Quantity, NO_ANOMALY};
use crate::error::{Result, SynthError};
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Timestamp rendering used in the tabular artifact.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    timestamp: String,
    temperature: f64,
    pressure: f64,
    power: f64,
    anomaly: AnomalyLabel,
}

impl From<DatasetRow> for CsvRecord {
    fn from(row: DatasetRow) -> Self {
        Self {
            timestamp: row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            temperature: row.temperature,
            pressure: row.pressure,
            power: row.power,
            anomaly: row.anomaly,
        }
    }
}

/// Write the table as CSV to any writer.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for row in dataset.rows() {
        wtr.serialize(CsvRecord::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table as CSV to `path`, creating or truncating the file.
pub fn write_dataset_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_dataset(dataset, std::io::BufWriter::new(file))
}

/// Read a table previously written by [`write_dataset`].
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut timestamps = Vec::new();
    let mut temperature = Vec::new();
    let mut pressure = Vec::new();
    let mut power = Vec::new();
    let mut labels = Vec::new();

    for record in rdr.deserialize() {
        let record: CsvRecord = record?;
        let naive = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| SynthError::TimestampError(format!("{}: {e}", record.timestamp)))?;
        if record.anomaly != NO_ANOMALY && Quantity::from_code(record.anomaly).is_none() {
            return Err(SynthError::InvalidParameter(format!(
                "unknown anomaly code {} at {}",
                record.anomaly, record.timestamp
            )));
        }
        timestamps.push(Utc.from_utc_datetime(&naive));
        temperature.push(record.temperature);
        pressure.push(record.pressure);
        power.push(record.power);
        labels.push(record.anomaly);
    }

    Dataset::with_labels(timestamps, [temperature, pressure, power], labels)
}

/// Read a CSV table from `path`.
pub fn read_dataset_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref())?;
    read_dataset(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Dataset {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let timestamps = (0..3).map(|i| base + Duration::minutes(i)).collect();
        Dataset::with_labels(
            timestamps,
            [
                vec![15.0, 15.25, 16.5],
                vec![100.0, 100.125, 99.5],
                vec![85.0, 86.0, 90.75],
            ],
            vec![0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf: Vec<u8> = Vec::new();
        write_dataset(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "timestamp,temperature,pressure,power,anomaly");
        assert_eq!(lines[1], "2025-01-01 00:00:00,15.0,100.0,85.0,0");
        assert_eq!(lines[2], "2025-01-01 00:01:00,15.25,100.125,86.0,2");
        assert!(lines[3].ends_with(",3"));
    }

    #[test]
    fn read_back_matches() {
        let ds = sample();
        let mut buf: Vec<u8> = Vec::new();
        write_dataset(&ds, &mut buf).unwrap();
        let back = read_dataset(buf.as_slice()).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn rejects_bad_timestamp() {
        let text = "timestamp,temperature,pressure,power,anomaly\nyesterday,1.0,2.0,3.0,0\n";
        assert!(matches!(
            read_dataset(text.as_bytes()),
            Err(SynthError::TimestampError(_))
        ));
    }

    #[test]
    fn rejects_unknown_anomaly_code() {
        let text = "timestamp,temperature,pressure,power,anomaly\n\
                    2025-01-01 00:00:00,1.0,2.0,3.0,3\n\
                    2025-01-01 00:01:00,1.0,2.0,3.0,4\n";
        assert!(matches!(
            read_dataset(text.as_bytes()),
            Err(SynthError::InvalidParameter(_))
        ));
    }
}
