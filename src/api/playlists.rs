use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, client},
    config,
    distribution::Budget,
    generator::{self, GenerationRequest, PlaylistTarget, TrackSource},
    types::{Playlist, Track},
    utils,
};

pub async fn list() -> Result<Json<Vec<Playlist>>, ApiError> {
    let client = client().await?;
    let playlists = client
        .user_playlists()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch playlists", e))?;
    Ok(Json(playlists))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    pub artist_ids: Vec<String>,
    pub total_tracks: Option<i64>,
    pub total_duration_ms: Option<i64>,
    #[serde(default)]
    pub randomize: bool,
    #[serde(default)]
    pub from_albums: bool,
    pub playlist_id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub clear_existing: bool,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponseBody {
    pub playlist_id: Option<String>,
    pub track_uris: Vec<String>,
    pub tracks: Vec<Track>,
    pub total_duration_ms: i64,
}

pub async fn generate(
    Json(body): Json<GenerateRequestBody>,
) -> Result<Json<GenerateResponseBody>, ApiError> {
    let budget = Budget::from_options(body.total_tracks, body.total_duration_ms)?;
    let request = GenerationRequest {
        artist_ids: body.artist_ids,
        budget,
        randomize: body.randomize,
        source: if body.from_albums {
            TrackSource::Albums
        } else {
            TrackSource::TopTracks
        },
        target: target(body.playlist_id, body.title, body.clear_existing),
        dry_run: body.dry_run,
        concurrency: config::fetch_concurrency(),
    };

    let client = client().await?;
    let outcome = generator::generate(&client, &client, request).await?;

    Ok(Json(GenerateResponseBody {
        playlist_id: outcome.playlist_id,
        track_uris: utils::track_uris(&outcome.tracks),
        total_duration_ms: utils::total_duration_ms(&outcome.tracks),
        tracks: outcome.tracks,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageRequestBody {
    pub playlist_id: Option<String>,
    pub title: Option<String>,
    pub track_uris: Vec<String>,
    #[serde(default)]
    pub clear_existing: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageResponseBody {
    pub success: bool,
    pub playlist_id: String,
}

/// Writes an already assembled list of track URIs to a playlist.
pub async fn manage(
    Json(body): Json<ManageRequestBody>,
) -> Result<Json<ManageResponseBody>, ApiError> {
    let target = target(body.playlist_id, body.title, body.clear_existing);

    let client = client().await?;
    let playlist_id = generator::persist(&client, &target, &body.track_uris)
        .await
        .map_err(|e| ApiError::upstream("Playlist creation or update failed", e))?;

    Ok(Json(ManageResponseBody {
        success: true,
        playlist_id,
    }))
}

/// An existing playlist id wins over a title; blank values count as absent.
fn target(playlist_id: Option<String>, title: Option<String>, clear: bool) -> PlaylistTarget {
    match playlist_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => PlaylistTarget::Existing { id, clear },
        None => PlaylistTarget::New {
            name: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| utils::default_playlist_name(Utc::now().date_naive())),
        },
    }
}
