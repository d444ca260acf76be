//! Bulk CSV import/export between local files and the API.
//!
//! Import validates that the file even looks like CSV before any bytes cross
//! the network; the server then validates row by row and reports created
//! names and per-row errors together. Export is a byte-for-byte passthrough
//! of the server's CSV body onto disk.

use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::constants;
use crate::error::AppError;
use crate::models::CsvImportResult;

/// Checks that a path is plausibly a CSV file, by extension
/// (case-insensitive). Runs before the file is read or uploaded.
pub fn validate_csv_candidate(path: &Path) -> Result<(), AppError> {
    let is_csv = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(constants::csv::EXTENSION));

    if is_csv {
        Ok(())
    } else {
        Err(AppError::csv_file(format!(
            "'{}' does not look like a CSV file (expected a .csv extension)",
            path.display()
        )))
    }
}

/// Reads a local CSV file and uploads it to the bulk-import endpoint.
///
/// Partial success is normal and lives inside the returned
/// [`CsvImportResult`]; an `Err` here means the upload itself failed or the
/// file was rejected locally.
#[instrument(skip(api))]
pub async fn import_from_path(
    api: &mut ApiClient,
    path: &Path,
) -> Result<CsvImportResult, AppError> {
    validate_csv_candidate(path)?;

    let contents = fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.csv");

    info!(
        "Uploading {} ({} bytes) for bulk import",
        path.display(),
        contents.len()
    );
    api.import_athletes_csv(file_name, contents).await
}

/// Downloads the CSV export and writes it to `path`.
/// Returns the number of bytes written.
#[instrument(skip(api))]
pub async fn export_to_path(api: &mut ApiClient, path: &Path) -> Result<usize, AppError> {
    let bytes = api.export_athletes_csv().await?;
    fs::write(path, &bytes).await?;
    info!("Wrote {} exported bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
