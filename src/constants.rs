//! Application-wide constants and configuration values
//!
//! This module centralizes endpoint paths, storage keys and other fixed
//! values so the rest of the codebase never hard-codes them inline.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// API endpoint paths, relative to the configured API domain
pub mod endpoints {
    /// Obtain an access/refresh token pair from username + password
    pub const LOGIN: &str = "/api/auth/login/";

    /// Exchange a refresh token for a new access token
    pub const REFRESH: &str = "/api/auth/refresh/";

    /// Athlete collection (GET = list, POST = create)
    pub const ATHLETES: &str = "/api/athletes/";

    /// Bulk import endpoint (multipart CSV upload)
    pub const IMPORT_CSV: &str = "/api/athletes/import_csv/";

    /// Bulk export endpoint (raw CSV response body)
    pub const EXPORT_CSV: &str = "/api/athletes/export_csv/";
}

/// Persisted token storage
pub mod storage {
    /// File name of the token store inside the app config directory
    pub const TOKENS_FILE: &str = "tokens.toml";

    /// Fixed key under which the access token is persisted
    pub const ACCESS_TOKEN_KEY: &str = "access_token";

    /// Fixed key under which the refresh token is persisted
    pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
}

/// CSV exchange format
pub mod csv {
    /// Header row shared by import and export files.
    /// A trailing empty field means the athlete has no club.
    pub const HEADER: &str = "full_name,birth_date,phone_number,ranking_points,club";

    /// File extension accepted for import (case-insensitive)
    pub const EXTENSION: &str = "csv";

    /// Content type attached to the uploaded file part
    pub const CONTENT_TYPE: &str = "text/csv";

    /// Default file name for exports when none is given
    pub const DEFAULT_EXPORT_FILE: &str = "athletes_export.csv";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "TTRANK_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "TTRANK_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds (default: 30)
    pub const HTTP_TIMEOUT: &str = "TTRANK_HTTP_TIMEOUT";
}
