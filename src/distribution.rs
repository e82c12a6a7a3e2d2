//! # Track Distribution
//!
//! Turns per-artist candidate pools into one ordered track list for a playlist.
//!
//! Each pool is ranked on its own first, either by popularity (highest first,
//! ties keep their input order) or by a uniform shuffle. The ranked pools are
//! then interleaved round-robin: every artist contributes its Nth track before
//! any artist contributes its (N+1)th, visiting artists in input order.
//!
//! Assembly stops on the first of:
//!
//! - the result already holds the requested number of tracks (checked before
//!   each pick, so it can stop mid-round),
//! - the running duration reached the requested duration (checked after each
//!   pick, so the track that crosses the threshold is kept),
//! - every pool is exhausted.
//!
//! ```rust,ignore
//! use artistmix::distribution::{Budget, distribute};
//!
//! let tracks = distribute(pools, Budget::TrackCount(25), false)?;
//! let uris: Vec<String> = tracks.into_iter().map(|t| t.uri).collect();
//! ```

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use crate::types::{ArtistTracks, Track};

/// Stopping criterion for playlist assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Stop once this many tracks were selected.
    TrackCount(usize),
    /// Stop right after the total duration (ms) reaches this value.
    Duration(u64),
    /// Take everything the pools have.
    Unbounded,
}

impl Budget {
    /// Builds a budget from the two optional caller values.
    ///
    /// At most one may be present and a present value must be positive.
    /// Neither present means [`Budget::Unbounded`].
    pub fn from_options(
        total_tracks: Option<i64>,
        total_duration_ms: Option<i64>,
    ) -> Result<Self, DistributionError> {
        let budget = match (total_tracks, total_duration_ms) {
            (Some(_), Some(_)) => {
                return Err(DistributionError::InvalidBudget(
                    "a track count and a duration cannot be combined".to_string(),
                ));
            }
            (Some(count), None) => Budget::TrackCount(usize::try_from(count).map_err(|_| {
                DistributionError::InvalidBudget(format!(
                    "track count must be positive, got {}",
                    count
                ))
            })?),
            (None, Some(ms)) => Budget::Duration(u64::try_from(ms).map_err(|_| {
                DistributionError::InvalidBudget(format!(
                    "duration must be positive, got {} ms",
                    ms
                ))
            })?),
            (None, None) => Budget::Unbounded,
        };

        budget.validate()?;
        Ok(budget)
    }

    fn validate(&self) -> Result<(), DistributionError> {
        match self {
            Budget::TrackCount(0) => Err(DistributionError::InvalidBudget(
                "track count must be positive, got 0".to_string(),
            )),
            Budget::Duration(0) => Err(DistributionError::InvalidBudget(
                "duration must be positive, got 0 ms".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid track '{track_id}' for artist {artist_id}: {reason}")]
    InvalidPool {
        artist_id: String,
        track_id: String,
        reason: String,
    },
}

/// Ranks every pool and interleaves them into a single track list.
///
/// Random mode uses the thread-local generator; see [`distribute_with_rng`]
/// for a reproducible variant.
pub fn distribute(
    pools: Vec<ArtistTracks>,
    budget: Budget,
    randomize: bool,
) -> Result<Vec<Track>, DistributionError> {
    distribute_with_rng(pools, budget, randomize, &mut rand::rng())
}

/// Same as [`distribute`] but shuffles with the given generator.
///
/// The whole input is validated before anything is ranked, so an error
/// never comes with a partial result.
pub fn distribute_with_rng<R: Rng + ?Sized>(
    mut pools: Vec<ArtistTracks>,
    budget: Budget,
    randomize: bool,
    rng: &mut R,
) -> Result<Vec<Track>, DistributionError> {
    budget.validate()?;
    validate_pools(&pools)?;

    for pool in pools.iter_mut() {
        rank(&mut pool.tracks, randomize, rng);
    }

    Ok(interleave(pools, budget))
}

/// Entry point taking the budget as two optional values, as sent by clients.
pub fn distribute_tracks(
    pools: Vec<ArtistTracks>,
    total_tracks: Option<i64>,
    total_duration_ms: Option<i64>,
    randomize: bool,
) -> Result<Vec<Track>, DistributionError> {
    let budget = Budget::from_options(total_tracks, total_duration_ms)?;
    distribute(pools, budget, randomize)
}

fn validate_pools(pools: &[ArtistTracks]) -> Result<(), DistributionError> {
    for pool in pools {
        for track in &pool.tracks {
            let reason = if track.duration_ms < 0 {
                format!("negative duration {} ms", track.duration_ms)
            } else if track.uri.trim().is_empty() {
                "missing uri".to_string()
            } else {
                continue;
            };

            return Err(DistributionError::InvalidPool {
                artist_id: pool.artist_id.clone(),
                track_id: track.id.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn rank<R: Rng + ?Sized>(tracks: &mut [Track], randomize: bool, rng: &mut R) {
    if randomize {
        tracks.shuffle(rng);
    } else {
        // stable: equal popularity keeps input order
        tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    }
}

fn interleave(pools: Vec<ArtistTracks>, budget: Budget) -> Vec<Track> {
    let mut cursors: Vec<_> = pools.into_iter().map(|p| p.tracks.into_iter()).collect();
    let mut selected: Vec<Track> = Vec::new();
    let mut total_ms: u64 = 0;

    loop {
        let mut added = false;

        for cursor in cursors.iter_mut() {
            if cursor.len() == 0 {
                continue;
            }

            if matches!(budget, Budget::TrackCount(limit) if selected.len() >= limit) {
                return selected;
            }

            let Some(track) = cursor.next() else {
                continue;
            };
            total_ms = total_ms.saturating_add(track.duration_ms.unsigned_abs());
            selected.push(track);
            added = true;

            if matches!(budget, Budget::Duration(limit) if total_ms >= limit) {
                return selected;
            }
        }

        if !added {
            return selected;
        }
    }
}
