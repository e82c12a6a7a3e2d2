use tabled::Table;

use crate::{
    cli::{connect, spinner},
    error, info,
    management::SelectionManager,
    success,
    types::Artist,
    utils, warning,
};

pub async fn search(query: String) {
    let client = connect().await;

    let pb = spinner("Searching artists...");
    let result = client.search_artists(&query).await;
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => warning!("No artists found for '{}'", query),
        Ok(artists) => print_artists(&artists),
        Err(e) => error!("Failed to search artists: {}", e),
    }
}

pub async fn top_artists() {
    let client = connect().await;

    let pb = spinner("Fetching your top artists...");
    let result = client.top_artists().await;
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => warning!("Spotify has no top artists for you yet."),
        Ok(artists) => print_artists(&artists),
        Err(e) => error!("Failed to fetch top artists: {}", e),
    }
}

/// Adds artists to the selection, either by id or by the best search match.
pub async fn select_add(artist_ids: Vec<String>, search: Option<String>) {
    let client = connect().await;
    let mut selection = SelectionManager::load_or_default().await;

    let mut found: Vec<Artist> = Vec::new();
    for artist_id in &artist_ids {
        match client.artist(artist_id).await {
            Ok(artist) => found.push(artist),
            Err(e) => warning!("Skipping artist {}: {}", artist_id, e),
        }
    }

    if let Some(query) = search {
        match client.search_artists(&query).await {
            Ok(artists) => match artists.into_iter().next() {
                Some(artist) => found.push(artist),
                None => warning!("No artists found for '{}'", query),
            },
            Err(e) => error!("Failed to search artists: {}", e),
        }
    }

    for artist in found {
        let name = artist.name.clone();
        if selection.add(artist) {
            success!("Selected {}", name);
        } else {
            info!("{} is already selected", name);
        }
    }

    persist(&selection).await;
}

pub async fn select_remove(artist_ids: Vec<String>) {
    let mut selection = SelectionManager::load_or_default().await;

    for artist_id in &artist_ids {
        match selection.remove(artist_id) {
            Some(artist) => success!("Removed {}", artist.name),
            None => warning!("Artist {} is not selected", artist_id),
        }
    }

    persist(&selection).await;
}

pub async fn select_clear() {
    let mut selection = SelectionManager::load_or_default().await;
    selection.clear();
    persist(&selection).await;
    success!("Selection cleared");
}

pub async fn select_list() {
    let selection = SelectionManager::load_or_default().await;
    if selection.is_empty() {
        warning!("No artists selected. Use `artistmix select add <id>`.");
        return;
    }

    info!("{} artists selected", selection.count());
    print_artists(selection.artists());
}

async fn persist(selection: &SelectionManager) {
    if let Err(e) = selection.persist().await {
        error!("Failed to save selection. Err: {}", e);
    }
}

fn print_artists(artists: &[Artist]) {
    println!("{}", Table::new(utils::artist_table_rows(artists)));
}
