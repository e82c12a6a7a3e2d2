use artistmix::types::*;

#[test]
fn test_parse_top_tracks_response() {
    let json = r#"{
        "tracks": [
            {
                "id": "3n3Ppam7vgaVa1iaRUc9Lp",
                "uri": "spotify:track:3n3Ppam7vgaVa1iaRUc9Lp",
                "duration_ms": 222075,
                "name": "Mr. Brightside",
                "popularity": 87,
                "explicit": false,
                "album": { "id": "6TJmQnO44YE5BtTxH8pop1" }
            }
        ]
    }"#;

    let res: TopTracksResponse = serde_json::from_str(json).unwrap();

    assert_eq!(res.tracks.len(), 1);
    assert_eq!(res.tracks[0].duration_ms, 222_075);
    assert_eq!(res.tracks[0].popularity, 87);
}

#[test]
fn test_album_tracks_default_popularity() {
    let json = r#"{
        "items": [
            {
                "id": "1",
                "uri": "spotify:track:1",
                "duration_ms": 1000,
                "name": "Intro",
                "track_number": 1
            }
        ]
    }"#;

    let res: AlbumTracksResponse = serde_json::from_str(json).unwrap();
    assert_eq!(res.items[0].popularity, 0);
}

#[test]
fn test_artist_tracks_uses_camel_case() {
    let pool = ArtistTracks {
        artist_id: "artist".to_string(),
        tracks: Vec::new(),
    };

    let value = serde_json::to_value(&pool).unwrap();
    assert_eq!(value["artistId"], "artist");
    assert!(value["tracks"].as_array().unwrap().is_empty());
}

#[test]
fn test_parse_playlist_without_images() {
    let json = r#"{
        "items": [
            {
                "id": "pl1",
                "name": "Mine",
                "collaborative": false,
                "owner": { "id": "me", "display_name": "Me" },
                "images": null,
                "tracks": { "href": "https://api.spotify.com/v1/playlists/pl1/tracks", "total": 12 }
            }
        ],
        "next": null
    }"#;

    let res: GetUserPlaylistsResponse = serde_json::from_str(json).unwrap();

    assert_eq!(res.items[0].owner.id, "me");
    assert_eq!(res.items[0].images, None);
    assert_eq!(res.items[0].tracks.total, 12);
}

#[test]
fn test_parse_search_response() {
    let json = r#"{
        "artists": {
            "items": [
                { "id": "0OdUWJ0sBjDrqHygGUXeCF", "name": "Band of Horses", "genres": ["indie folk"], "images": [] }
            ],
            "next": null,
            "total": 1
        }
    }"#;

    let res: SearchArtistsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(res.artists.items[0].name, "Band of Horses");
    assert_eq!(res.artists.total, Some(1));
}

#[test]
fn test_profile_summary_from_user_profile() {
    let json = r#"{
        "id": "wizzler",
        "display_name": "Wizzler",
        "email": "wizzler@example.com",
        "country": "SE",
        "images": [
            { "url": "https://i.scdn.co/image/large", "width": 300, "height": 300 },
            { "url": "https://i.scdn.co/image/small", "width": 64, "height": 64 }
        ]
    }"#;

    let profile: UserProfile = serde_json::from_str(json).unwrap();
    let summary = ProfileSummary::from(profile);

    assert_eq!(summary.id, "wizzler");
    assert_eq!(summary.name.as_deref(), Some("Wizzler"));
    assert_eq!(summary.email.as_deref(), Some("wizzler@example.com"));
    assert_eq!(summary.image.as_deref(), Some("https://i.scdn.co/image/large"));
}

#[test]
fn test_profile_summary_without_image() {
    let json = r#"{ "id": "plain", "display_name": null, "images": [] }"#;

    let summary = ProfileSummary::from(serde_json::from_str::<UserProfile>(json).unwrap());
    let body = serde_json::to_value(&summary).unwrap();

    assert_eq!(body["id"], "plain");
    assert!(body["image"].is_null());
    assert!(body["name"].is_null());
}
