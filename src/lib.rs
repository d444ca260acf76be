//! TTRank Athlete Roster Client Library
//!
//! This library talks to a TTRank athletes API: token-based authentication
//! with automatic refresh, athlete CRUD through a server-backed roster
//! cache, and CSV bulk import/export.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ttrank::api::ApiClient;
//! use ttrank::auth::TokenStore;
//! use ttrank::config::Config;
//! use ttrank::error::AppError;
//! use ttrank::roster::AthleteRoster;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let tokens = TokenStore::load().await?;
//!     let api = ApiClient::new(&config, tokens)?;
//!
//!     let mut roster = AthleteRoster::new(api);
//!     roster.refresh().await?;
//!
//!     for athlete in roster.athletes() {
//!         println!("{} - {} pts", athlete.full_name, athlete.ranking_points);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod csv_transfer;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;

// Re-export commonly used types for convenience
pub use api::ApiClient;
pub use auth::TokenStore;
pub use config::Config;
pub use error::AppError;
pub use models::{Athlete, AthleteInput, AthleteUpdate, AuthTokens, CsvImportResult};
pub use roster::AthleteRoster;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
