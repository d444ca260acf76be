use crate::config::paths::get_tokens_path;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// On-disk shape of the persisted token pair. Both keys are optional so a
/// file written by an older session (or hand-edited) still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Holds the access/refresh token pair for the lifetime of the process and
/// mirrors every change to a TOML file under the app config directory, so a
/// later invocation picks the session back up.
///
/// Tokens are created at login and destroyed at logout or when a refresh
/// exchange fails for good. No expiry is tracked locally; an access token is
/// valid until the API says otherwise with a 401.
#[derive(Debug)]
pub struct TokenStore {
    path: String,
    tokens: StoredTokens,
}

impl TokenStore {
    /// Loads the token store from the default platform location.
    /// A missing file simply means nobody is logged in.
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(get_tokens_path()).await
    }

    /// Loads the token store from a custom file path.
    pub async fn load_from_path(path: impl Into<String>) -> Result<Self, AppError> {
        let path = path.into();
        let tokens = if Path::new(&path).exists() {
            let content = fs::read_to_string(&path).await?;
            match toml::from_str::<StoredTokens>(&content) {
                Ok(tokens) => tokens,
                Err(e) => {
                    // An unreadable token file is treated as logged-out
                    // rather than wedging every command.
                    warn!("Discarding unreadable token file {path}: {e}");
                    StoredTokens::default()
                }
            }
        } else {
            debug!("No token file at {path}, starting unauthenticated");
            StoredTokens::default()
        };

        Ok(TokenStore { path, tokens })
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.refresh_token.as_deref()
    }

    /// True when an access token is present. Says nothing about whether the
    /// API will still accept it.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token.is_some()
    }

    /// Persists a full token pair, replacing whatever was stored (login).
    pub async fn store(&mut self, access: String, refresh: String) -> Result<(), AppError> {
        self.tokens = StoredTokens {
            access_token: Some(access),
            refresh_token: Some(refresh),
        };
        self.persist().await?;
        info!("Stored new token pair");
        Ok(())
    }

    /// Replaces only the access token, keeping the refresh token: the refresh
    /// endpoint mints a new access token and nothing else.
    pub async fn store_access(&mut self, access: String) -> Result<(), AppError> {
        self.tokens.access_token = Some(access);
        self.persist().await?;
        debug!("Stored refreshed access token");
        Ok(())
    }

    /// Drops both tokens and deletes the backing file (logout, or a refresh
    /// exchange that failed for good).
    pub async fn clear(&mut self) -> Result<(), AppError> {
        self.tokens = StoredTokens::default();
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Io(e)),
        }
        info!("Cleared stored tokens");
        Ok(())
    }

    async fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = Path::new(&self.path).parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(&self.tokens)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}
