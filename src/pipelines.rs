//! Saving tabular records as CSV under the project's data directories.
//!
//! Each record becomes one row; the header comes from the record's field
//! names. No index column is written.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ProjectPaths;
use crate::error::{Error, Result};

/// Writes `records` to `data/raw/<file_name>` and returns the path.
///
/// # Examples
/// ```
/// use serde::Serialize;
/// use shared_utils::config::ProjectPaths;
/// use shared_utils::pipelines::save_raw;
///
/// #[derive(Serialize)]
/// struct Price { symbol: &'static str, close: f64 }
///
/// let tmp = tempfile::tempdir().unwrap();
/// let paths = ProjectPaths::new(tmp.path());
/// let rows = [Price { symbol: "BTC", close: 101.5 }];
/// let path = save_raw(&rows, "prices.csv", &paths).unwrap();
/// assert_eq!(std::fs::read_to_string(path).unwrap(), "symbol,close\nBTC,101.5\n");
/// ```
pub fn save_raw<R: Serialize>(records: &[R], file_name: &str, paths: &ProjectPaths) -> Result<PathBuf> {
    save(records, file_name, false, paths)
}

/// Writes `records` to `data/processed/<file_name>` and returns the path.
pub fn save_processed<R: Serialize>(
    records: &[R],
    file_name: &str,
    paths: &ProjectPaths,
) -> Result<PathBuf> {
    save(records, file_name, true, paths)
}

fn save<R: Serialize>(
    records: &[R],
    file_name: &str,
    processed: bool,
    paths: &ProjectPaths,
) -> Result<PathBuf> {
    let path = paths.data_path(file_name, processed)?;
    write_csv(records, &path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "saved csv");
    Ok(path)
}

fn write_csv<R: Serialize>(records: &[R], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| Error::io(path, e))
}
