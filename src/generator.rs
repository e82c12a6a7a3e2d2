//! # Playlist Generation
//!
//! Glue between the music catalog, the track distribution and playlist
//! persistence:
//!
//! ```text
//! artist ids --(fan-out, ≤ N in flight)--> pools --distribute--> tracks --> playlist
//! ```
//!
//! The catalog and the playlist store sit behind [`MusicCatalog`] and
//! [`PlaylistStore`] so the flow runs the same against Spotify and against
//! in-memory fakes.

use std::future::Future;

use futures_util::{StreamExt, TryStreamExt, stream};
use thiserror::Error;

use crate::{
    Res,
    distribution::{self, Budget, DistributionError},
    spotify::SpotifyClient,
    types::{AlbumRef, ArtistTracks, Track},
    utils,
};

/// Read access to artist tracks.
pub trait MusicCatalog {
    fn top_tracks(&self, artist_id: &str) -> impl Future<Output = Res<Vec<Track>>> + Send;

    fn albums(&self, artist_id: &str) -> impl Future<Output = Res<Vec<AlbumRef>>> + Send;

    fn album_tracks(&self, album_id: &str) -> impl Future<Output = Res<Vec<Track>>> + Send;
}

/// Write access to the user's playlists.
pub trait PlaylistStore {
    /// Creates an empty playlist and returns its id.
    fn create_playlist(&self, name: &str) -> impl Future<Output = Res<String>> + Send;

    fn clear_playlist_tracks(&self, playlist_id: &str) -> impl Future<Output = Res<()>> + Send;

    fn append_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> impl Future<Output = Res<()>> + Send;
}

impl MusicCatalog for SpotifyClient {
    async fn top_tracks(&self, artist_id: &str) -> Res<Vec<Track>> {
        Ok(SpotifyClient::top_tracks(self, artist_id).await?)
    }

    async fn albums(&self, artist_id: &str) -> Res<Vec<AlbumRef>> {
        Ok(SpotifyClient::albums(self, artist_id).await?)
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        Ok(SpotifyClient::album_tracks(self, album_id).await?)
    }
}

impl PlaylistStore for SpotifyClient {
    async fn create_playlist(&self, name: &str) -> Res<String> {
        Ok(SpotifyClient::create_playlist(self, name).await?)
    }

    async fn clear_playlist_tracks(&self, playlist_id: &str) -> Res<()> {
        SpotifyClient::clear_playlist_tracks(self, playlist_id).await?;
        Ok(())
    }

    async fn append_tracks_to_playlist(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.append_tracks(playlist_id, uris).await?;
        Ok(())
    }
}

/// Where an artist's candidate tracks come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackSource {
    /// The artist's top tracks, ranked by popularity.
    #[default]
    TopTracks,
    /// Every track of the artist's albums and singles. Deeper cuts, but
    /// without popularity scores, so it pairs with random mode.
    Albums,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistTarget {
    New { name: String },
    Existing { id: String, clear: bool },
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub artist_ids: Vec<String>,
    pub budget: Budget,
    pub randomize: bool,
    pub source: TrackSource,
    pub target: PlaylistTarget,
    /// Assemble the track list without touching any playlist.
    pub dry_run: bool,
    pub concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// `None` for dry runs and when nothing was selected.
    pub playlist_id: Option<String>,
    pub tracks: Vec<Track>,
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Select at least one artist")]
    NoArtists,

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("Failed to fetch artist tracks: {0}")]
    Fetch(Box<dyn std::error::Error + Send + Sync>),

    #[error("Playlist creation or update failed: {0}")]
    Playlist(Box<dyn std::error::Error + Send + Sync>),
}

/// Fetches one pool per artist, keeping the order of `artist_ids`.
///
/// At most `concurrency` requests are in flight at once. The first failure
/// aborts the whole batch.
pub async fn collect_pools<C: MusicCatalog + Sync>(
    catalog: &C,
    artist_ids: &[String],
    source: TrackSource,
    concurrency: usize,
) -> Res<Vec<ArtistTracks>> {
    stream::iter(artist_ids.iter().cloned())
        .map(|artist_id| async move {
            let tracks = match source {
                TrackSource::TopTracks => catalog.top_tracks(&artist_id).await?,
                TrackSource::Albums => album_pool(catalog, &artist_id).await?,
            };
            Res::Ok(ArtistTracks { artist_id, tracks })
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

// album listings are walked sequentially so one artist holds a single slot
async fn album_pool<C: MusicCatalog + Sync>(catalog: &C, artist_id: &str) -> Res<Vec<Track>> {
    let mut tracks = Vec::new();
    for album in catalog.albums(artist_id).await? {
        tracks.extend(catalog.album_tracks(&album.id).await?);
    }
    Ok(tracks)
}

/// Creates or reuses the target playlist and appends `uris` to it.
pub async fn persist<S: PlaylistStore + Sync>(
    store: &S,
    target: &PlaylistTarget,
    uris: &[String],
) -> Res<String> {
    let playlist_id = match target {
        PlaylistTarget::New { name } => store.create_playlist(name).await?,
        PlaylistTarget::Existing { id, clear } => {
            if *clear {
                store.clear_playlist_tracks(id).await?;
            }
            id.clone()
        }
    };

    store.append_tracks_to_playlist(&playlist_id, uris).await?;
    Ok(playlist_id)
}

/// Runs a full generation: fetch pools, distribute, persist.
///
/// Nothing is written when the distribution comes back empty.
pub async fn generate<C, S>(
    catalog: &C,
    store: &S,
    request: GenerationRequest,
) -> Result<GenerationOutcome, GenerateError>
where
    C: MusicCatalog + Sync,
    S: PlaylistStore + Sync,
{
    if request.artist_ids.is_empty() {
        return Err(GenerateError::NoArtists);
    }

    let pools = collect_pools(
        catalog,
        &request.artist_ids,
        request.source,
        request.concurrency,
    )
    .await
    .map_err(GenerateError::Fetch)?;

    let tracks = distribution::distribute(pools, request.budget, request.randomize)?;

    if request.dry_run || tracks.is_empty() {
        return Ok(GenerationOutcome {
            playlist_id: None,
            tracks,
        });
    }

    let playlist_id = persist(store, &request.target, &utils::track_uris(&tracks))
        .await
        .map_err(GenerateError::Playlist)?;

    Ok(GenerationOutcome {
        playlist_id: Some(playlist_id),
        tracks,
    })
}
