//! In-memory cache of the server's athlete list, kept consistent with the
//! API through explicit fetch/create/update/delete operations.
//!
//! The server is authoritative: the cache only ever holds what the server
//! confirmed. Mutations touch the cache strictly after a success response,
//! and a failed refresh empties the cache rather than leaving stale rows on
//! display.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::api::ApiClient;
use crate::csv_transfer;
use crate::error::AppError;
use crate::models::{Athlete, AthleteInput, AthleteUpdate, CsvImportResult};

pub struct AthleteRoster {
    api: ApiClient,
    athletes: Vec<Athlete>,
    loading: bool,
    last_error: Option<String>,
}

impl AthleteRoster {
    pub fn new(api: ApiClient) -> Self {
        AthleteRoster {
            api,
            athletes: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    /// The cached list, in server order.
    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the whole cache with the server's current list.
    ///
    /// On any failure the cache is emptied: after a failed refresh the
    /// caller sees an empty list plus an error, never yesterday's rows. The
    /// cache is never left partially populated.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.loading = true;
        self.last_error = None;
        let result = self.api.list_athletes().await;
        self.loading = false;

        match result {
            Ok(athletes) => {
                info!("Fetched {} athletes", athletes.len());
                self.athletes = athletes;
                Ok(())
            }
            Err(e) => {
                self.athletes.clear();
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Creates an athlete and appends the server-echoed record (now carrying
    /// its id) to the cache. Existing entries keep their order.
    #[instrument(skip(self, input), fields(full_name = %input.full_name))]
    pub async fn create(&mut self, input: &AthleteInput) -> Result<Athlete, AppError> {
        match self.api.create_athlete(input).await {
            Ok(created) => {
                self.last_error = None;
                self.athletes.push(created.clone());
                Ok(created)
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Applies a partial update; on success only the cached entry with the
    /// matching id is replaced by the server echo.
    #[instrument(skip(self, changes))]
    pub async fn update(&mut self, id: i64, changes: &AthleteUpdate) -> Result<Athlete, AppError> {
        match self.api.update_athlete(id, changes).await {
            Ok(updated) => {
                self.last_error = None;
                if let Some(entry) = self
                    .athletes
                    .iter_mut()
                    .find(|athlete| athlete.id == Some(id))
                {
                    *entry = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Deletes an athlete; the cached entry is removed only after the server
    /// confirms. No optimistic removal.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        match self.api.delete_athlete(id).await {
            Ok(()) => {
                self.last_error = None;
                self.athletes.retain(|athlete| athlete.id != Some(id));
                Ok(())
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Bulk-imports a CSV file, then re-fetches the list: the import report
    /// carries names and row errors, not records, so the cache cannot be
    /// patched in place.
    ///
    /// A failed post-import refresh is logged (and lands in `last_error`)
    /// but does not turn a successful import into an error.
    #[instrument(skip(self))]
    pub async fn import_csv(&mut self, path: &Path) -> Result<CsvImportResult, AppError> {
        let result = match csv_transfer::import_from_path(&mut self.api, path).await {
            Ok(result) => result,
            Err(e) => return Err(self.record_failure(e)),
        };

        info!(
            "Imported {}/{} rows ({} failed)",
            result.successful, result.total_processed, result.failed
        );
        if let Err(e) = self.refresh().await {
            warn!("Post-import refresh failed: {e}");
        }
        Ok(result)
    }

    /// Exports the server's CSV to a local file.
    /// Returns the number of bytes written.
    #[instrument(skip(self))]
    pub async fn export_csv(&mut self, path: &Path) -> Result<usize, AppError> {
        match csv_transfer::export_to_path(&mut self.api, path).await {
            Ok(written) => {
                self.last_error = None;
                Ok(written)
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    fn record_failure(&mut self, error: AppError) -> AppError {
        warn!("Roster operation failed: {error}");
        self.last_error = Some(error.to_string());
        error
    }
}
