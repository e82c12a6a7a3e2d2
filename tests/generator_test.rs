use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use artistmix::{
    Res,
    distribution::{Budget, DistributionError},
    generator::*,
    types::{AlbumRef, Track},
};

// Helper function to create a test track
fn track(id: &str, duration_ms: i64, popularity: i64) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        duration_ms,
        name: id.to_uppercase(),
        popularity,
    }
}

fn album(id: &str) -> AlbumRef {
    AlbumRef {
        id: id.to_string(),
        name: id.to_uppercase(),
        album_type: "album".to_string(),
    }
}

#[derive(Default)]
struct FakeCatalog {
    top_tracks: HashMap<String, Vec<Track>>,
    albums: HashMap<String, Vec<AlbumRef>>,
    album_tracks: HashMap<String, Vec<Track>>,
    delays_ms: HashMap<String, u64>,
    failing: Option<String>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: AtomicUsize,
}

impl FakeCatalog {
    fn with_top_tracks(entries: Vec<(&str, Vec<Track>)>) -> Self {
        Self {
            top_tracks: entries
                .into_iter()
                .map(|(id, tracks)| (id.to_string(), tracks))
                .collect(),
            ..Default::default()
        }
    }

    async fn request(&self, key: &str) -> Res<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays_ms.get(key).copied().unwrap_or(5);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.as_deref() == Some(key) {
            return Err(format!("upstream failure for {}", key).into());
        }
        Ok(())
    }
}

impl MusicCatalog for FakeCatalog {
    async fn top_tracks(&self, artist_id: &str) -> Res<Vec<Track>> {
        self.request(artist_id).await?;
        Ok(self.top_tracks.get(artist_id).cloned().unwrap_or_default())
    }

    async fn albums(&self, artist_id: &str) -> Res<Vec<AlbumRef>> {
        self.request(artist_id).await?;
        Ok(self.albums.get(artist_id).cloned().unwrap_or_default())
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        self.request(album_id).await?;
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeStore {
    calls: Mutex<Vec<String>>,
    appended: Mutex<Vec<String>>,
}

impl FakeStore {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PlaylistStore for FakeStore {
    async fn create_playlist(&self, name: &str) -> Res<String> {
        self.calls.lock().unwrap().push(format!("create:{}", name));
        Ok("new-playlist".to_string())
    }

    async fn clear_playlist_tracks(&self, playlist_id: &str) -> Res<()> {
        self.calls.lock().unwrap().push(format!("clear:{}", playlist_id));
        Ok(())
    }

    async fn append_tracks_to_playlist(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("append:{}:{}", playlist_id, uris.len()));
        self.appended.lock().unwrap().extend(uris.iter().cloned());
        Ok(())
    }
}

fn two_artist_catalog() -> FakeCatalog {
    FakeCatalog::with_top_tracks(vec![
        ("A", vec![track("a1", 180_000, 90), track("a2", 200_000, 80)]),
        ("B", vec![track("b1", 150_000, 95)]),
    ])
}

fn request(artist_ids: &[&str], budget: Budget, target: PlaylistTarget) -> GenerationRequest {
    GenerationRequest {
        artist_ids: artist_ids.iter().map(|s| s.to_string()).collect(),
        budget,
        randomize: false,
        source: TrackSource::TopTracks,
        target,
        dry_run: false,
        concurrency: 5,
    }
}

fn new_playlist(name: &str) -> PlaylistTarget {
    PlaylistTarget::New {
        name: name.to_string(),
    }
}

fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test]
async fn test_collect_pools_keeps_artist_order() {
    let mut catalog = FakeCatalog::with_top_tracks(vec![
        ("slow", vec![track("s1", 1000, 1)]),
        ("medium", vec![track("m1", 1000, 1)]),
        ("fast", vec![track("f1", 1000, 1)]),
    ]);
    catalog.delays_ms = HashMap::from([
        ("slow".to_string(), 60),
        ("medium".to_string(), 30),
        ("fast".to_string(), 1),
    ]);

    let artist_ids = vec!["slow".to_string(), "medium".to_string(), "fast".to_string()];
    let pools = collect_pools(&catalog, &artist_ids, TrackSource::TopTracks, 5)
        .await
        .unwrap();

    let order: Vec<&str> = pools.iter().map(|p| p.artist_id.as_str()).collect();
    assert_eq!(order, vec!["slow", "medium", "fast"]);
}

#[tokio::test]
async fn test_collect_pools_caps_concurrency() {
    let mut catalog = FakeCatalog::default();
    let artist_ids: Vec<String> = (0..12).map(|i| format!("artist{}", i)).collect();
    for id in &artist_ids {
        catalog.delays_ms.insert(id.clone(), 20);
    }

    let pools = collect_pools(&catalog, &artist_ids, TrackSource::TopTracks, 5)
        .await
        .unwrap();

    assert_eq!(pools.len(), 12);
    assert_eq!(catalog.requests.load(Ordering::SeqCst), 12);
    assert_eq!(catalog.max_in_flight.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_collect_pools_treats_zero_concurrency_as_one() {
    let catalog = two_artist_catalog();
    let artist_ids = vec!["A".to_string(), "B".to_string()];

    let pools = collect_pools(&catalog, &artist_ids, TrackSource::TopTracks, 0)
        .await
        .unwrap();

    assert_eq!(pools.len(), 2);
    assert_eq!(catalog.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_collect_pools_aborts_on_failure() {
    let mut catalog = two_artist_catalog();
    catalog.failing = Some("B".to_string());

    let artist_ids = vec!["A".to_string(), "B".to_string()];
    let result = collect_pools(&catalog, &artist_ids, TrackSource::TopTracks, 5).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("upstream failure for B"));
}

#[tokio::test]
async fn test_collect_pools_from_albums() {
    let catalog = FakeCatalog {
        albums: HashMap::from([("A".to_string(), vec![album("al1"), album("al2")])]),
        album_tracks: HashMap::from([
            (
                "al1".to_string(),
                vec![track("t1", 1000, 0), track("t2", 1000, 0)],
            ),
            ("al2".to_string(), vec![track("t3", 1000, 0)]),
        ]),
        ..Default::default()
    };

    let artist_ids = vec!["A".to_string()];
    let pools = collect_pools(&catalog, &artist_ids, TrackSource::Albums, 5)
        .await
        .unwrap();

    assert_eq!(pools.len(), 1);
    assert_eq!(ids(&pools[0].tracks), vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_generate_creates_new_playlist() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();

    let outcome = generate(
        &catalog,
        &store,
        request(&["A", "B"], Budget::TrackCount(3), new_playlist("Road trip")),
    )
    .await
    .unwrap();

    assert_eq!(outcome.playlist_id.as_deref(), Some("new-playlist"));
    assert_eq!(ids(&outcome.tracks), vec!["a1", "b1", "a2"]);
    assert_eq!(
        store.calls(),
        vec!["create:Road trip", "append:new-playlist:3"]
    );
    assert_eq!(
        *store.appended.lock().unwrap(),
        vec!["spotify:track:a1", "spotify:track:b1", "spotify:track:a2"]
    );
}

#[tokio::test]
async fn test_generate_with_duration_budget() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();

    let outcome = generate(
        &catalog,
        &store,
        request(&["A", "B"], Budget::Duration(300_000), new_playlist("Short")),
    )
    .await
    .unwrap();

    assert_eq!(ids(&outcome.tracks), vec!["a1", "b1"]);
}

#[tokio::test]
async fn test_generate_clears_existing_playlist_when_asked() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();
    let target = PlaylistTarget::Existing {
        id: "pl1".to_string(),
        clear: true,
    };

    let outcome = generate(&catalog, &store, request(&["A", "B"], Budget::Unbounded, target))
        .await
        .unwrap();

    assert_eq!(outcome.playlist_id.as_deref(), Some("pl1"));
    assert_eq!(store.calls(), vec!["clear:pl1", "append:pl1:3"]);
}

#[tokio::test]
async fn test_generate_appends_to_existing_playlist() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();
    let target = PlaylistTarget::Existing {
        id: "pl1".to_string(),
        clear: false,
    };

    generate(&catalog, &store, request(&["B"], Budget::Unbounded, target))
        .await
        .unwrap();

    assert_eq!(store.calls(), vec!["append:pl1:1"]);
}

#[tokio::test]
async fn test_generate_dry_run_does_not_touch_playlists() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();
    let mut req = request(&["A", "B"], Budget::TrackCount(2), new_playlist("Dry"));
    req.dry_run = true;

    let outcome = generate(&catalog, &store, req).await.unwrap();

    assert_eq!(outcome.playlist_id, None);
    assert_eq!(ids(&outcome.tracks), vec!["a1", "b1"]);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_generate_skips_persisting_empty_result() {
    let catalog = FakeCatalog::default();
    let store = FakeStore::default();

    let outcome = generate(
        &catalog,
        &store,
        request(&["nobody"], Budget::TrackCount(10), new_playlist("Empty")),
    )
    .await
    .unwrap();

    assert!(outcome.tracks.is_empty());
    assert_eq!(outcome.playlist_id, None);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_generate_requires_artists() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();

    let result = generate(
        &catalog,
        &store,
        request(&[], Budget::TrackCount(10), new_playlist("None")),
    )
    .await;

    assert!(matches!(result, Err(GenerateError::NoArtists)));
}

#[tokio::test]
async fn test_generate_rejects_malformed_tracks() {
    let catalog = FakeCatalog::with_top_tracks(vec![("A", vec![track("bad", -5, 10)])]);
    let store = FakeStore::default();

    let result = generate(
        &catalog,
        &store,
        request(&["A"], Budget::TrackCount(10), new_playlist("Broken")),
    )
    .await;

    assert!(matches!(
        result,
        Err(GenerateError::Distribution(DistributionError::InvalidPool { .. }))
    ));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_generate_reports_fetch_failure() {
    let mut catalog = two_artist_catalog();
    catalog.failing = Some("A".to_string());
    let store = FakeStore::default();

    let result = generate(
        &catalog,
        &store,
        request(&["A", "B"], Budget::TrackCount(3), new_playlist("Fail")),
    )
    .await;

    assert!(matches!(result, Err(GenerateError::Fetch(_))));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_persist_uri_list() {
    let store = FakeStore::default();
    let uris = vec!["spotify:track:1".to_string(), "spotify:track:2".to_string()];

    let playlist_id = persist(&store, &new_playlist("Manual"), &uris).await.unwrap();

    assert_eq!(playlist_id, "new-playlist");
    assert_eq!(store.calls(), vec!["create:Manual", "append:new-playlist:2"]);
    assert_eq!(*store.appended.lock().unwrap(), uris);
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn test_generation_futures_are_send() {
    let catalog = two_artist_catalog();
    let store = FakeStore::default();
    let artist_ids = vec!["A".to_string(), "B".to_string()];

    let pools = collect_pools(&catalog, &artist_ids, TrackSource::Albums, 5);
    assert_send(&pools);

    let generation = generate(
        &catalog,
        &store,
        request(&["A"], Budget::TrackCount(1), new_playlist("Mix")),
    );
    assert_send(&generation);
}
