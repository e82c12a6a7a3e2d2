//! # API Module
//!
//! HTTP endpoints of the local artistmix server.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and version
//! - [`callback`] - `GET /callback`, completes the OAuth PKCE flow
//! - [`profile`] - `GET /api/profile`, name, image, email and id of the current user
//! - [`artists::search`] - `GET /api/search?q=`, artist search
//! - [`artists::top_artists`] - `GET /api/artists/top`, suggested artists
//! - [`artists::top_tracks`] - `POST /api/artists/top-tracks`, one track pool per artist
//! - [`playlists::list`] - `GET /api/playlists`, playlists the user can write to
//! - [`playlists::generate`] - `POST /api/playlists/generate`, full generation
//! - [`playlists::manage`] - `POST /api/playlists/manage`, write given URIs to a playlist
//!
//! The `/api` routes use the token cached by `artistmix auth` and answer
//! with `401` when there is none. Failures are returned as
//! `{ "error": "..." }`: `400` for invalid input, `500` for upstream errors.

mod artists;
mod callback;
mod error;
mod health;
mod playlists;
mod profile;

pub use artists::{search, top_artists, top_tracks};
pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use playlists::{
    generate as generate_playlist, list as list_playlists, manage as manage_playlist,
};
pub use profile::profile;

use crate::spotify::SpotifyClient;

async fn client() -> Result<SpotifyClient, ApiError> {
    SpotifyClient::connect()
        .await
        .map_err(|e| ApiError::unauthorized(e.to_string()))
}
