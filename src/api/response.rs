//! Response status handling, error-message extraction and JSON parsing.

use http::StatusCode;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::AppError;

/// Fallback message when a response body yields nothing usable.
const GENERIC_ERROR: &str = "Request failed";

/// Extracts a human-readable error message from a response body.
///
/// Checked in priority order:
/// 1. a JSON string body is used as-is
/// 2. a JSON object's `detail` field
/// 3. a JSON object's `message` field
/// 4. a JSON object's `error` field
/// 5. any other JSON object (e.g. a per-field validation map) is surfaced
///    verbatim as compact JSON
/// 6. a non-empty plain-text body
/// 7. the HTTP status line as a generic fallback
pub fn extract_error_message(body: &str, status: StatusCode) -> String {
    let fallback = || {
        format!(
            "{GENERIC_ERROR} ({})",
            status.canonical_reason().unwrap_or("Unknown error")
        )
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(fields)) => ["detail", "message", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str).map(str::to_owned))
            // Field-error maps from validation failures are shown verbatim
            .unwrap_or_else(|| Value::Object(fields).to_string()),
        Ok(_) => fallback(),
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                fallback()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Maps a non-2xx response to the matching `AppError`, consuming the body for
/// its error message. Success responses pass through untouched.
pub async fn error_for_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body, status);

    error!("HTTP {} - {} (URL: {})", status.as_u16(), message, url);

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message, url),
        StatusCode::FORBIDDEN => AppError::forbidden(message, url),
        StatusCode::NOT_FOUND => AppError::api_not_found(url),
        s if s.is_client_error() => AppError::api_client_error(s.as_u16(), message, url),
        s => AppError::api_server_error(s.as_u16(), message, url),
    })
}

/// Reads a successful response body and parses it as JSON, distinguishing an
/// empty body, a body that is not JSON at all, and JSON with an unexpected
/// shape.
pub async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let url = response.url().to_string();
    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);

            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                // Valid JSON but unexpected structure
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
