use tabled::Table;

use crate::{
    cli::{connect, spinner},
    error,
    types::PlaylistTableRow,
    warning,
};

pub async fn list_playlists() {
    let client = connect().await;

    let pb = spinner("Fetching playlists...");
    let result = client.user_playlists().await;
    pb.finish_and_clear();

    match result {
        Ok(playlists) if playlists.is_empty() => warning!("No writable playlists found."),
        Ok(playlists) => {
            let rows: Vec<PlaylistTableRow> = playlists
                .into_iter()
                .map(|p| PlaylistTableRow {
                    id: p.id,
                    name: p.name,
                    tracks: p.tracks.total,
                    collaborative: p.collaborative,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}
