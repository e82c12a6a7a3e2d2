//! Artist and track lookups used to pick artists and build track pools.

use crate::{
    spotify::SpotifyClient,
    types::{
        AlbumRef, AlbumTracksResponse, AlbumsResponse, Artist, SearchArtistsResponse,
        TopArtistsResponse, TopTracksResponse, Track,
    },
};

const SEARCH_LIMIT: &str = "5";
const TOP_ARTISTS_LIMIT: &str = "12";
const ALBUMS_LIMIT: &str = "20";
const ALBUM_TRACKS_LIMIT: &str = "50";

impl SpotifyClient {
    /// Searches artists by name.
    ///
    /// An empty query returns an empty list without hitting the API.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text artist name; surrounding whitespace is ignored
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Artist>)` - Up to five best matches, in Spotify's ranking
    /// - `Err(reqwest::Error)` - Network error or an error status after retries
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, reqwest::Error> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let res: SearchArtistsResponse = self
            .get_json(
                "search",
                &[("q", query), ("type", "artist"), ("limit", SEARCH_LIMIT)],
            )
            .await?;
        Ok(res.artists.items)
    }

    /// Fetches a single artist by id.
    ///
    /// Fails with `404` for unknown ids.
    pub async fn artist(&self, artist_id: &str) -> Result<Artist, reqwest::Error> {
        self.get_json(&format!("artists/{}", artist_id), &[]).await
    }

    /// The user's long-term favorite artists, used as suggestions.
    ///
    /// Requires the `user-top-read` scope.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Artist>)` - Up to twelve artists, most listened first
    /// - `Err(reqwest::Error)` - Network error or an error status after retries
    pub async fn top_artists(&self) -> Result<Vec<Artist>, reqwest::Error> {
        let res: TopArtistsResponse = self
            .get_json(
                "me/top/artists",
                &[("limit", TOP_ARTISTS_LIMIT), ("time_range", "long_term")],
            )
            .await?;
        Ok(res.items)
    }

    /// Top tracks of an artist in the configured market.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify artist id
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Track>)` - Usually ten tracks, each with a popularity score
    /// - `Err(reqwest::Error)` - Network error or an error status after retries
    pub async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, reqwest::Error> {
        let res: TopTracksResponse = self
            .get_json(
                &format!("artists/{}/top-tracks", artist_id),
                &[("market", self.market.as_str())],
            )
            .await?;
        Ok(res.tracks)
    }

    /// Albums and singles of an artist, first page only.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify artist id
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<AlbumRef>)` - Up to twenty releases
    /// - `Err(reqwest::Error)` - Network error or an error status after retries
    pub async fn albums(&self, artist_id: &str) -> Result<Vec<AlbumRef>, reqwest::Error> {
        let res: AlbumsResponse = self
            .get_json(
                &format!("artists/{}/albums", artist_id),
                &[
                    ("include_groups", "album,single"),
                    ("limit", ALBUMS_LIMIT),
                    ("market", self.market.as_str()),
                ],
            )
            .await?;
        Ok(res.items)
    }

    /// Tracks of an album. These carry no popularity score.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>, reqwest::Error> {
        let res: AlbumTracksResponse = self
            .get_json(
                &format!("albums/{}/tracks", album_id),
                &[("limit", ALBUM_TRACKS_LIMIT), ("market", self.market.as_str())],
            )
            .await?;
        Ok(res.items)
    }
}
