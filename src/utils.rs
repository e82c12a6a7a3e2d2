use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, ArtistTableRow, Playlist, Track, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Converts a duration given in whole minutes to milliseconds.
pub fn minutes_to_ms(minutes: i64) -> i64 {
    minutes.saturating_mul(60 * 1000)
}

/// Formats milliseconds as `m:ss`, or `h:mm:ss` from one hour on.
pub fn format_duration(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub fn total_duration_ms(tracks: &[Track]) -> i64 {
    tracks.iter().map(|t| t.duration_ms).sum()
}

pub fn track_uris(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}

/// Keeps the playlists a user may write to: their own and collaborative ones.
pub fn writable_playlists(playlists: Vec<Playlist>, user_id: &str) -> Vec<Playlist> {
    playlists
        .into_iter()
        .filter(|p| p.collaborative || p.owner.id == user_id)
        .collect()
}

pub fn default_playlist_name(date: NaiveDate) -> String {
    format!("Artist Mix {}", date.format("%Y-%m-%d"))
}

pub fn artist_table_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            id: a.id.clone(),
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
        })
        .collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            duration: format_duration(t.duration_ms),
            popularity: t.popularity,
        })
        .collect()
}
