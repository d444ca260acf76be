//! Wire-format data models shared by the API client and the roster cache.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single athlete record as the API serves it.
///
/// `id` is assigned by the server: it is `None` exactly while the record has
/// not been persisted server-side, and `Some` on every record echoed back by
/// the API. `created_at`/`updated_at` are server-managed and never sent on
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub ranking_points: u32,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Athlete {
    /// True once the record carries a server-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Payload for creating an athlete: everything the user controls,
/// nothing the server assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteInput {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub ranking_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
}

/// Partial update payload. Fields left `None` are omitted from the request
/// body entirely; the server keeps their current values. An empty `club`
/// string clears the club.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AthleteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
}

impl AthleteUpdate {
    /// True when no field is set; sending this would be a no-op request.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.birth_date.is_none()
            && self.phone_number.is_none()
            && self.ranking_points.is_none()
            && self.club.is_none()
    }
}

/// Access/refresh token pair returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Body sent to the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// The refresh endpoint mints only a new access token;
/// the refresh token stays valid.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// List response in either of the two shapes the server has been observed
/// returning: a bare array, or a paginated envelope exposing `results`.
/// Neither is documented as canonical, so both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AthleteListing {
    Plain(Vec<Athlete>),
    Paginated { results: Vec<Athlete> },
}

impl AthleteListing {
    pub fn into_athletes(self) -> Vec<Athlete> {
        match self {
            AthleteListing::Plain(athletes) => athletes,
            AthleteListing::Paginated { results } => results,
        }
    }
}

/// Outcome report of a bulk CSV import. Partial success is normal: the
/// report carries created names and per-row errors at the same time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvImportResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_athletes: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl CsvImportResult {
    /// True when the import created some rows and rejected others.
    pub fn is_partial(&self) -> bool {
        self.successful > 0 && self.failed > 0
    }
}
