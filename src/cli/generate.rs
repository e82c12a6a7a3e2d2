use chrono::Utc;
use tabled::Table;

use crate::{
    cli::{connect, spinner},
    config,
    distribution::Budget,
    error,
    generator::{self, GenerationRequest, PlaylistTarget, TrackSource},
    info,
    management::SelectionManager,
    success, utils, warning,
};

/// Song count used when neither a count nor a duration is given.
pub const DEFAULT_TRACK_COUNT: u32 = 25;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub artist_ids: Vec<String>,
    pub count: Option<u32>,
    pub minutes: Option<u32>,
    pub random: bool,
    pub from_albums: bool,
    pub name: Option<String>,
    pub playlist_id: Option<String>,
    pub clear_existing: bool,
    pub dry_run: bool,
}

impl GenerateOptions {
    /// A duration in minutes replaces the song count.
    pub fn budget(&self) -> Result<Budget, String> {
        let result = match self.minutes {
            Some(minutes) => Budget::from_options(None, Some(utils::minutes_to_ms(minutes.into()))),
            None => Budget::from_options(
                Some(self.count.unwrap_or(DEFAULT_TRACK_COUNT).into()),
                None,
            ),
        };
        result.map_err(|e| e.to_string())
    }

    pub fn target(&self) -> PlaylistTarget {
        match &self.playlist_id {
            Some(id) => PlaylistTarget::Existing {
                id: id.clone(),
                clear: self.clear_existing,
            },
            None => PlaylistTarget::New {
                name: self
                    .name
                    .clone()
                    .unwrap_or_else(|| utils::default_playlist_name(Utc::now().date_naive())),
            },
        }
    }

    pub fn source(&self) -> TrackSource {
        if self.from_albums {
            TrackSource::Albums
        } else {
            TrackSource::TopTracks
        }
    }
}

pub async fn generate(opts: GenerateOptions) {
    let budget = match opts.budget() {
        Ok(budget) => budget,
        Err(e) => error!("{}", e),
    };

    let artist_ids = if opts.artist_ids.is_empty() {
        SelectionManager::load_or_default().await.artist_ids()
    } else {
        opts.artist_ids.clone()
    };

    if artist_ids.is_empty() {
        error!("Select at least one artist: `artistmix select add <id>` or pass --artist.");
    }

    let request = GenerationRequest {
        artist_ids,
        budget,
        randomize: opts.random,
        source: opts.source(),
        target: opts.target(),
        dry_run: opts.dry_run,
        concurrency: config::fetch_concurrency(),
    };

    info!(
        "Generating from {} artists ({})",
        request.artist_ids.len(),
        describe(&budget)
    );

    let client = connect().await;
    let pb = spinner("Fetching artist tracks...");
    let result = generator::generate(&client, &client, request).await;
    pb.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => error!("Failed to generate playlist: {}", e),
    };

    if outcome.tracks.is_empty() {
        warning!("The selected artists have no tracks. Nothing to add.");
        return;
    }

    println!("{}", Table::new(utils::track_table_rows(&outcome.tracks)));
    info!(
        "{} tracks, {}",
        outcome.tracks.len(),
        utils::format_duration(utils::total_duration_ms(&outcome.tracks))
    );

    match outcome.playlist_id {
        Some(playlist_id) => success!("Playlist {} updated", playlist_id),
        None => info!("Dry run, no playlist was changed."),
    }
}

fn describe(budget: &Budget) -> String {
    match budget {
        Budget::TrackCount(n) => format!("{} songs", n),
        Budget::Duration(ms) => format!("at least {} minutes", ms / 60_000),
        Budget::Unbounded => "all tracks".to_string(),
    }
}
