use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, client},
    config,
    generator::{self, TrackSource},
    types::{Artist, ArtistTracks},
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search(Query(params): Query<SearchParams>) -> Result<Json<Vec<Artist>>, ApiError> {
    let query = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Err(ApiError::bad_request("Invalid query")),
    };

    let client = client().await?;
    let artists = client
        .search_artists(&query)
        .await
        .map_err(|e| ApiError::upstream("Failed to search artists", e))?;
    Ok(Json(artists))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopArtistsResponse {
    pub top_artists: Vec<Artist>,
}

pub async fn top_artists() -> Result<Json<TopArtistsResponse>, ApiError> {
    let client = client().await?;
    let top_artists = client
        .top_artists()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch top artists", e))?;
    Ok(Json(TopArtistsResponse { top_artists }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTracksRequest {
    pub artist_ids: Vec<String>,
    #[serde(default)]
    pub from_albums: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTracksResponse {
    pub artist_tracks: Vec<ArtistTracks>,
}

pub async fn top_tracks(
    Json(body): Json<TopTracksRequest>,
) -> Result<Json<TopTracksResponse>, ApiError> {
    let client = client().await?;
    let source = if body.from_albums {
        TrackSource::Albums
    } else {
        TrackSource::TopTracks
    };

    let artist_tracks =
        generator::collect_pools(&client, &body.artist_ids, source, config::fetch_concurrency())
            .await
            .map_err(|e| ApiError::upstream("Failed to fetch artist tracks", e))?;
    Ok(Json(TopTracksResponse { artist_tracks }))
}
