//! Authenticated HTTP client for the athletes API.
//!
//! One explicitly constructed client instance carries the reqwest client,
//! the API base URL and the injected token store; nothing lives in ambient
//! global state. Every protected request attaches the stored bearer token
//! and goes through a single refresh-and-replay pass when the API answers
//! 401 (see [`ApiClient::send_authorized`]).

use bytes::Bytes;
use http::StatusCode;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info, instrument, warn};

use super::http_client::create_http_client_with_timeout;
use super::response::{error_for_status, parse_json};
use super::urls;
use crate::auth::TokenStore;
use crate::config::Config;
use crate::constants;
use crate::error::AppError;
use crate::models::{
    Athlete, AthleteInput, AthleteListing, AthleteUpdate, AuthTokens, CsvImportResult,
    LoginCredentials, RefreshRequest, RefreshResponse,
};

pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenStore,
}

/// Sends a request, translating transport-level failures into the
/// network error variants. HTTP error statuses are not handled here.
async fn send(request: RequestBuilder) -> Result<Response, AppError> {
    match request.send().await {
        Ok(response) => Ok(response),
        Err(e) => {
            let url = e.url().map(|u| u.to_string()).unwrap_or_default();
            if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            }
        }
    }
}

impl ApiClient {
    /// Builds a client from the loaded configuration and an injected token
    /// store.
    pub fn new(config: &Config, tokens: TokenStore) -> Result<Self, AppError> {
        let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(ApiClient {
            http,
            base_url: config.api_domain.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Authenticates with username + password and persists the returned
    /// token pair. A 401 here means bad credentials, not an expired session,
    /// so stored tokens are left untouched and no refresh is attempted.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), AppError> {
        let url = urls::build_login_url(&self.base_url);
        let response = send(self.http.post(url.as_str()).json(credentials)).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthorized("Invalid username or password", url));
        }

        let response = error_for_status(response).await?;
        let tokens: AuthTokens = parse_json(response).await?;
        self.tokens.store(tokens.access, tokens.refresh).await?;
        info!("Login succeeded, token pair stored");
        Ok(())
    }

    /// Discards the stored token pair.
    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.tokens.clear().await
    }

    /// Fetches the full athlete list, accepting both response shapes the
    /// server is known to produce.
    #[instrument(skip(self))]
    pub async fn list_athletes(&mut self) -> Result<Vec<Athlete>, AppError> {
        let url = urls::build_athletes_url(&self.base_url);
        let response = self
            .send_authorized(|http| Ok(http.get(url.as_str())))
            .await?;
        let response = error_for_status(response).await?;
        let listing: AthleteListing = parse_json(response).await?;
        Ok(listing.into_athletes())
    }

    /// Fetches a single athlete by server-assigned id.
    #[instrument(skip(self))]
    pub async fn get_athlete(&mut self, id: i64) -> Result<Athlete, AppError> {
        let url = urls::build_athlete_url(&self.base_url, id);
        let response = self
            .send_authorized(|http| Ok(http.get(url.as_str())))
            .await?;
        let response = error_for_status(response).await?;
        parse_json(response).await
    }

    /// Creates an athlete and returns the server-echoed record, which
    /// carries the assigned id and timestamps.
    #[instrument(skip(self, input), fields(full_name = %input.full_name))]
    pub async fn create_athlete(&mut self, input: &AthleteInput) -> Result<Athlete, AppError> {
        let url = urls::build_athletes_url(&self.base_url);
        let response = self
            .send_authorized(|http| Ok(http.post(url.as_str()).json(input)))
            .await?;
        let response = error_for_status(response).await?;
        parse_json(response).await
    }

    /// Applies a partial update and returns the server-echoed record.
    #[instrument(skip(self, changes))]
    pub async fn update_athlete(
        &mut self,
        id: i64,
        changes: &AthleteUpdate,
    ) -> Result<Athlete, AppError> {
        let url = urls::build_athlete_url(&self.base_url, id);
        let response = self
            .send_authorized(|http| Ok(http.put(url.as_str()).json(changes)))
            .await?;
        let response = error_for_status(response).await?;
        parse_json(response).await
    }

    /// Deletes an athlete. The response body is empty on success.
    #[instrument(skip(self))]
    pub async fn delete_athlete(&mut self, id: i64) -> Result<(), AppError> {
        let url = urls::build_athlete_url(&self.base_url, id);
        let response = self
            .send_authorized(|http| Ok(http.delete(url.as_str())))
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Uploads CSV bytes as a multipart `file` part and returns the
    /// structured per-row import report.
    #[instrument(skip(self, contents), fields(file_name = %file_name, bytes = contents.len()))]
    pub async fn import_athletes_csv(
        &mut self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<CsvImportResult, AppError> {
        let url = urls::build_import_csv_url(&self.base_url);
        let response = self
            .send_authorized(|http| {
                // The form is rebuilt per attempt; multipart bodies cannot be
                // cloned for a replay.
                let part = Part::bytes(contents.clone())
                    .file_name(file_name.to_owned())
                    .mime_str(constants::csv::CONTENT_TYPE)
                    .map_err(|e| AppError::csv_file(format!("Invalid upload content type: {e}")))?;
                Ok(http
                    .post(url.as_str())
                    .multipart(Form::new().part("file", part)))
            })
            .await?;
        let response = error_for_status(response).await?;
        parse_json(response).await
    }

    /// Downloads the CSV export as raw bytes.
    #[instrument(skip(self))]
    pub async fn export_athletes_csv(&mut self) -> Result<Bytes, AppError> {
        let url = urls::build_export_csv_url(&self.base_url);
        let response = self
            .send_authorized(|http| Ok(http.get(url.as_str())))
            .await?;
        let response = error_for_status(response).await?;
        response.bytes().await.map_err(AppError::ApiFetch)
    }

    /// Sends a protected request with the bearer token attached, replaying it
    /// at most once after a refresh exchange.
    ///
    /// On a 401:
    /// - without a stored refresh token the 401 propagates to the caller;
    /// - with one, the refresh endpoint is called, the new access token is
    ///   persisted and the request is rebuilt and replayed exactly once,
    ///   strictly after the refresh completes;
    /// - if the refresh exchange itself fails, both tokens are cleared and
    ///   the caller gets a session-expired error;
    /// - a 401 on the replayed request is terminal. Never two refreshes for
    ///   one original request.
    async fn send_authorized<F>(&mut self, build_request: F) -> Result<Response, AppError>
    where
        F: Fn(&Client) -> Result<RequestBuilder, AppError>,
    {
        let request = self.attach_bearer(build_request(&self.http)?);
        let response = send(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(refresh_token) = self.tokens.refresh_token().map(|t| t.to_owned()) else {
            debug!("Got 401 with no stored refresh token, propagating");
            return Ok(response);
        };

        info!("Access token rejected (401), exchanging refresh token");
        match self.exchange_refresh_token(&refresh_token).await {
            Ok(access) => self.tokens.store_access(access).await?,
            Err(e) => {
                warn!("Refresh exchange failed, clearing stored tokens: {e}");
                self.tokens.clear().await?;
                return Err(AppError::SessionExpired);
            }
        }

        let replay = self.attach_bearer(build_request(&self.http)?);
        send(replay).await
    }

    fn attach_bearer(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn exchange_refresh_token(&self, refresh: &str) -> Result<String, AppError> {
        let url = urls::build_refresh_url(&self.base_url);
        let response = send(self.http.post(url.as_str()).json(&RefreshRequest { refresh })).await?;
        let response = error_for_status(response).await?;
        let parsed: RefreshResponse = parse_json(response).await?;
        Ok(parsed.access)
    }
}
