use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{spotify, types::Token, warning};

/// Seconds before the actual expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when
    /// it is about to expire.
    ///
    /// A failed refresh is reported and the stale token is returned; the
    /// API call using it will then fail with 401.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired(Utc::now().timestamp() as u64) {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(mut new_token) => {
                    if new_token.refresh_token.is_empty() {
                        new_token.refresh_token = self.token.refresh_token.clone();
                    }
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to cache refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Token refresh failed: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("artistmix/cache/token.json");
        path
    }

    /// Removes the cached token, logging the user out.
    ///
    /// Returns `false` when there was no cached token.
    pub async fn delete() -> Result<bool, String> {
        Self::delete_at(&Self::token_path()).await
    }

    pub async fn delete_at(path: &Path) -> Result<bool, String> {
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.to_string()),
        }
    }
}
