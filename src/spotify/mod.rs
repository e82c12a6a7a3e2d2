//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API that playlist generation
//! needs. Every request carries the user's bearer token; responses are
//! decoded straight into the structs in [`crate::types`].
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//! - [`artists`] - artist search, top artists, top tracks, albums and album tracks
//! - [`playlist`] - current user, playlist listing, create, clear and append
//!
//! ## Transient failures
//!
//! [`send_with_retry`] retries a request on `502 Bad Gateway` after ten
//! seconds and on `429 Too Many Requests` after the advertised `Retry-After`
//! delay, as long as that delay stays under two minutes. Every other error
//! status is returned to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = spotify::SpotifyClient::connect().await?;
//! let tracks = client.top_tracks("0OdUWJ0sBjDrqHygGUXeCF").await?;
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{Res, config, management::TokenManager, warning};

pub mod artists;
pub mod auth;
pub mod playlist;

const MAX_ATTEMPTS: u32 = 5;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Limits applied by [`send_with_retry`].
///
/// The default matches what the Web API tolerates: five attempts, ten seconds
/// after a `502` and at most two minutes of advertised `Retry-After`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub bad_gateway_delay: Duration,
    /// Longer `Retry-After` values are returned as errors instead of waited out.
    pub max_retry_after_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            bad_gateway_delay: BAD_GATEWAY_DELAY,
            max_retry_after_secs: MAX_RETRY_AFTER_SECS,
        }
    }
}

/// Returns a usable access token from the local cache.
///
/// Fails when no token was cached yet, which means `artistmix auth` has not
/// been run.
pub async fn access_token() -> Res<String> {
    let mut token_mgr = TokenManager::load()
        .await
        .map_err(|e| format!("Failed to load token. Please run artistmix auth\n Error: {}", e))?;
    Ok(token_mgr.get_valid_token().await)
}

/// Authenticated Web API client.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
    market: String,
    retry: RetryPolicy,
}

impl SpotifyClient {
    /// Creates a client for the configured API URL and market.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token, sent as bearer auth on every request
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, config::spotify_apiurl(), config::spotify_market())
    }

    /// Creates a client against an explicit API base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token
    /// * `api_url` - Base URL such as `https://api.spotify.com/v1`; a trailing
    ///   slash is ignored
    /// * `market` - ISO 3166-1 country code used for track lookups
    pub fn with_base_url(token: String, api_url: String, market: String) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            market,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the default [`RetryPolicy`].
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds a client from the cached (and refreshed if needed) token.
    pub async fn connect() -> Res<Self> {
        Ok(Self::new(access_token().await?))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, reqwest::Error> {
        let request = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(query);
        send_with_retry(request, &self.retry).await?.json::<T>().await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, reqwest::Error> {
        let request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(&self.token)
            .json(body);
        send_with_retry(request, &self.retry).await?.json::<T>().await
    }
}

/// Sends a request, retrying transient failures.
///
/// # Arguments
///
/// * `request` - Fully built request; it is cloned for every attempt
/// * `policy` - Attempt limit and delays to apply
///
/// # Returns
///
/// - `Ok(Response)` - The first successful response
/// - `Err(reqwest::Error)` - A network error, a non-retryable error status, or
///   the last error status once `policy.max_attempts` is reached
///
/// # Retry Logic
///
/// - `502 Bad Gateway` is retried after `policy.bad_gateway_delay`
/// - `429 Too Many Requests` is retried after the `Retry-After` header (one
///   second when missing), unless that exceeds `policy.max_retry_after_secs`
///
/// Requests whose body cannot be cloned are sent once.
pub async fn send_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut attempt = 1;

    loop {
        let Some(current) = request.try_clone() else {
            return request.send().await?.error_for_status();
        };
        let response = current.send().await?;

        if attempt >= policy.max_attempts {
            return response.error_for_status();
        }

        match response.status() {
            StatusCode::BAD_GATEWAY => sleep(policy.bad_gateway_delay).await,
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = retry_after_secs(&response);
                if retry_after > policy.max_retry_after_secs {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                    return response.error_for_status();
                }
                sleep(Duration::from_secs(retry_after)).await;
            }
            _ => return response.error_for_status(),
        }

        attempt += 1;
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}
