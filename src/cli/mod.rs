//! # CLI Module
//!
//! User-facing commands. Each command talks to Spotify through
//! [`crate::spotify::SpotifyClient`], keeps local state through
//! [`crate::management`] and reports progress with the crate's output macros.
//!
//! ## Typical session
//!
//! ```bash
//! artistmix auth                          # authorize with Spotify
//! artistmix profile                       # check who is signed in
//! artistmix top-artists                   # get suggestions
//! artistmix search radiohead              # find artist ids
//! artistmix select add 4Z8W4fKeB5YxbusRsdQVPb
//! artistmix generate --minutes 90 --random --name "Long drive"
//! artistmix generate --count 30 --playlist-id 37i9dQZF1DX --clear-existing
//! artistmix logout                        # forget the cached token
//! ```
//!
//! Fatal problems (no token, invalid budget, upstream failure) end the
//! process through `error!`; partial problems such as one unknown artist id
//! are reported with `warning!` and skipped.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, spotify::SpotifyClient};

mod artists;
mod auth;
mod generate;
mod playlists;
mod profile;
mod serve;

pub use artists::search;
pub use artists::select_add;
pub use artists::select_clear;
pub use artists::select_list;
pub use artists::select_remove;
pub use artists::top_artists;
pub use auth::{auth, logout};
pub use generate::{DEFAULT_TRACK_COUNT, GenerateOptions, generate};
pub use playlists::list_playlists;
pub use profile::profile;
pub use serve::serve;

async fn connect() -> SpotifyClient {
    match SpotifyClient::connect().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
