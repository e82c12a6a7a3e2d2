//! Configuration management for artistmix.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory (`<data_local_dir>/artistmix/.env`).
//! Variables already present in the environment win over the file.
//!
//! Required values terminate the program with a hint when missing; optional
//! ones fall back to the defaults below.

use std::{env, path::PathBuf};

use crate::error;

/// Market used for top-track lookups when `SPOTIFY_MARKET` is unset.
pub const DEFAULT_MARKET: &str = "US";

/// Simultaneous outbound catalog requests when `FETCH_CONCURRENCY` is unset.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 5;

/// Loads environment variables from `<data_local_dir>/artistmix/.env`.
///
/// Creates the directory if needed. A missing or unreadable file is reported
/// as an error so the caller can decide whether the plain environment is
/// enough.
///
/// # Returns
///
/// Returns `Ok(())` when the file was loaded, or an error string naming the
/// path when the directory cannot be created or the file cannot be parsed.
///
/// # Example
///
/// ```
/// use artistmix::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Location of the `.env` file.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/artistmix/.env`
/// - macOS: `~/Library/Application Support/artistmix/.env`
/// - Windows: `%LOCALAPPDATA%/artistmix/.env`
///
/// Falls back to `./artistmix/.env` when the platform has no data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("artistmix/.env");
    path
}

// missing values end the program with a hint where to set them
fn required(key: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => error!(
            "{} must be set. Add it to {} or export it.",
            key,
            env_path().display()
        ),
    }
}

/// Address the local HTTP server binds to, e.g. `127.0.0.1:8888`.
///
/// # Environment Variable
///
/// Reads from `SERVER_ADDRESS`. The OAuth redirect URI must point at this
/// address. The program terminates when it is not set.
pub fn server_addr() -> String {
    required("SERVER_ADDRESS")
}

/// Client ID of the registered Spotify application.
///
/// # Environment Variable
///
/// Reads from `SPOTIFY_API_AUTH_CLIENT_ID`. Create an application in the
/// Spotify developer dashboard to obtain one. No client secret is needed for
/// the PKCE flow.
pub fn spotify_client_id() -> String {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// OAuth redirect URI; must match the one registered with Spotify and point
/// at this server's `/callback` route.
pub fn spotify_redirect_uri() -> String {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Space separated OAuth scopes.
///
/// Generating playlists needs at least `user-top-read`,
/// `playlist-read-private`, `playlist-read-collaborative` and
/// `playlist-modify-private`.
pub fn spotify_scope() -> String {
    required("SPOTIFY_API_AUTH_SCOPE")
}

/// Authorization endpoint, e.g. `https://accounts.spotify.com/authorize`.
pub fn spotify_apiauth_url() -> String {
    required("SPOTIFY_API_AUTH_URL")
}

/// Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    required("SPOTIFY_API_URL")
}

/// Token endpoint, e.g. `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    required("SPOTIFY_API_TOKEN_URL")
}

/// Market used for top tracks and album listings.
///
/// # Environment Variable
///
/// Reads from `SPOTIFY_MARKET`, an ISO 3166-1 alpha-2 country code. Defaults
/// to [`DEFAULT_MARKET`] when unset or blank.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MARKET.to_string())
}

/// Upper bound for in-flight catalog requests while collecting pools.
///
/// # Environment Variable
///
/// Reads from `FETCH_CONCURRENCY`. See [`parse_concurrency`] for the
/// fallback rules.
pub fn fetch_concurrency() -> usize {
    parse_concurrency(env::var("FETCH_CONCURRENCY").ok().as_deref())
}

/// Parses a concurrency setting, falling back to the default for missing,
/// malformed or zero values.
///
/// # Example
///
/// ```
/// use artistmix::config::{DEFAULT_FETCH_CONCURRENCY, parse_concurrency};
///
/// assert_eq!(parse_concurrency(Some("8")), 8);
/// assert_eq!(parse_concurrency(Some("0")), DEFAULT_FETCH_CONCURRENCY);
/// ```
pub fn parse_concurrency(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_FETCH_CONCURRENCY)
}
