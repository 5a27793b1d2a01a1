//! Persistence of the finished dataset and its summary statistics.
//!
//! - [`tabular`]: CSV table with columns `timestamp,temperature,pressure,power,anomaly`
//! - [`npy`]: flat `f64` arrays in NumPy `.npy` format

pub mod npy;
pub mod tabular;

pub use npy::{read_npy_f64, write_npy_f64};
pub use tabular::{read_dataset_csv, write_dataset_csv, TIMESTAMP_FORMAT};

use crate::core::Dataset;
use crate::error::Result;
use crate::utils::SummaryStatistics;
use std::path::{Path, PathBuf};
use tracing::info;

/// File names of the three exported artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub table: String,
    pub means: String,
    pub stds: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            table: "data_2025.csv".to_string(),
            means: "means.npy".to_string(),
            stds: "stds.npy".to_string(),
        }
    }
}

/// Paths written by [`export_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPaths {
    pub table: PathBuf,
    pub means: PathBuf,
    pub stds: PathBuf,
}

/// Write the table and both statistics vectors into `dir`.
pub fn export_all(
    dataset: &Dataset,
    summary: &SummaryStatistics,
    dir: &Path,
    names: &ArtifactNames,
) -> Result<ExportedPaths> {
    let paths = ExportedPaths {
        table: dir.join(&names.table),
        means: dir.join(&names.means),
        stds: dir.join(&names.stds),
    };

    info!(path = %paths.table.display(), rows = dataset.len(), "saving data to CSV");
    write_dataset_csv(dataset, &paths.table)?;

    write_npy_f64(&paths.means, &summary.means)?;
    write_npy_f64(&paths.stds, &summary.stds)?;
    info!(
        means = %paths.means.display(),
        stds = %paths.stds.display(),
        "saved means and standard deviations"
    );

    Ok(paths)
}
