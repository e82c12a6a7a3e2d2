use reqwest::Method;

use crate::{
    spotify::SpotifyClient,
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist,
        SnapshotResponse, TrackUrisRequest, UserProfile,
    },
    utils,
};

/// The Web API accepts at most this many URIs per add request.
pub const MAX_URIS_PER_REQUEST: usize = 100;

const PLAYLISTS_PAGE_LIMIT: &str = "50";

impl SpotifyClient {
    pub async fn current_user(&self) -> Result<UserProfile, reqwest::Error> {
        self.get_json("me", &[]).await
    }

    /// Playlists the current user owns or collaborates on.
    pub async fn user_playlists(&self) -> Result<Vec<Playlist>, reqwest::Error> {
        let user = self.current_user().await?;
        let res: GetUserPlaylistsResponse = self
            .get_json("me/playlists", &[("limit", PLAYLISTS_PAGE_LIMIT)])
            .await?;
        Ok(utils::writable_playlists(res.items, &user.id))
    }

    /// Creates a private playlist for the current user and returns its id.
    pub async fn create_playlist(&self, name: &str) -> Result<String, reqwest::Error> {
        let user = self.current_user().await?;
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Generated by artistmix".to_string(),
            public: false,
        };

        let res: CreatePlaylistResponse = self
            .send_json(Method::POST, &format!("users/{}/playlists", user.id), &body)
            .await?;
        Ok(res.id)
    }

    /// Removes every track from a playlist.
    pub async fn clear_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<SnapshotResponse, reqwest::Error> {
        let body = TrackUrisRequest { uris: Vec::new() };
        self.send_json(
            Method::PUT,
            &format!("playlists/{}/tracks", playlist_id),
            &body,
        )
        .await
    }

    /// Appends tracks in request-sized chunks, preserving order.
    pub async fn append_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Vec<SnapshotResponse>, reqwest::Error> {
        let mut snapshots = Vec::new();
        for chunk in uris.chunks(MAX_URIS_PER_REQUEST) {
            let body = TrackUrisRequest {
                uris: chunk.to_vec(),
            };
            let snapshot: SnapshotResponse = self
                .send_json(
                    Method::POST,
                    &format!("playlists/{}/tracks", playlist_id),
                    &body,
                )
                .await?;
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}
