//! OAuth 2.0 authorization code flow with PKCE.
//!
//! artistmix is a public client, so no client secret is stored. Instead every
//! login generates a random code verifier; its SHA-256 challenge goes into the
//! authorization URL and the verifier itself is sent when the code is
//! exchanged for a token.
//!
//! The redirect lands on the local server's `/callback` route
//! ([`crate::api::callback`]), which completes the exchange and hands the
//! token back through the shared [`PkceToken`] state.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res, config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE flow and caches the resulting token.
///
/// Starts the local server for the redirect, opens the authorization page in
/// the browser and waits up to a minute for the callback to deliver a token.
///
/// # Arguments
///
/// * `shared_state` - State shared with the callback handler. The verifier is
///   stored here before the browser opens; the handler writes the token back.
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: random 128 character verifier and its S256 challenge
/// 2. **Server Start**: the HTTP server is spawned to receive the redirect
/// 3. **Browser Launch**: the authorization URL is opened, or printed when no
///    browser can be started
/// 4. **Token Exchange**: done by the callback handler
/// 5. **Token Persistence**: the token is written to the local cache
///
/// # Error Handling
///
/// - An invalid `SPOTIFY_API_AUTH_URL` terminates the program
/// - A failure to cache the token terminates the program
/// - No token within 60 seconds terminates the program
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();
    let scope = config::spotify_scope();
    let auth_url = match Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    ) {
        Ok(url) => url.to_string(),
        Err(e) => error!("Invalid SPOTIFY_API_AUTH_URL: {}", e),
    };

    // the callback handler needs the verifier before the browser redirects
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state once per second until the callback stored a token.
///
/// Returns `None` after [`CALLBACK_TIMEOUT`].
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// # Arguments
///
/// * `refresh_token` - Refresh token from the cached [`Token`]
///
/// # Returns
///
/// - `Ok(Token)` - The new token, stamped with the current time. Its
///   `refresh_token` is empty when Spotify did not rotate it; the caller keeps
///   the old one in that case.
/// - `Err(_)` - Network failure, an error status from the token endpoint, or
///   an unexpected response body
///
/// # Example
///
/// ```rust,ignore
/// let token = spotify::auth::refresh_token(&cached.refresh_token).await?;
/// ```
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id();
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;
    Ok(into_token(body, Utc::now().timestamp() as u64))
}

/// Exchanges an authorization code for a token.
///
/// # Arguments
///
/// * `code` - Authorization code from the `/callback` query string
/// * `verifier` - The code verifier whose challenge was sent with the
///   authorization request
///
/// # Returns
///
/// - `Ok(Token)` - Access and refresh token, stamped with the current time
/// - `Err(_)` - Network failure, a rejected code or verifier, or an
///   unexpected response body
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;
    Ok(into_token(body, Utc::now().timestamp() as u64))
}

/// Converts a token endpoint response into the cached token shape.
///
/// Missing `refresh_token` and `scope` fields become empty strings.
///
/// # Arguments
///
/// * `body` - Decoded token endpoint response
/// * `obtained_at` - Unix timestamp in seconds used for expiry checks
pub fn into_token(body: TokenResponse, obtained_at: u64) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token: body.refresh_token.unwrap_or_default(),
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in,
        obtained_at,
    }
}
