use spomocli::sync::bucket::{bucket_by_month, month_key};
use spomocli::sync::matcher::{index_monthly_playlists, is_monthly_name};
use spomocli::sync::reconcile::plan;
use spomocli::types::{Playlist, ReconcileStep, SavedTrack, TrackArtist, TrackInfo};

// Helper function to create a saved track
fn create_saved_track(uri: &str, name: &str, added_at: &str) -> SavedTrack {
    SavedTrack {
        added_at: added_at.to_string(),
        track: TrackInfo {
            uri: uri.to_string(),
            name: name.to_string(),
            artists: vec![TrackArtist {
                id: format!("{}_artist_id", uri),
                name: "Artist".to_string(),
            }],
        },
    }
}

// Helper function to create a playlist
fn create_playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        tracks: None,
    }
}

#[test]
fn test_month_key_formats_month_and_year() {
    let key = month_key("2024-03-05T10:00:00Z").unwrap();
    assert_eq!(key, "March 2024");

    let key = month_key("2023-12-31T23:59:59Z").unwrap();
    assert_eq!(key, "December 2023");
}

#[test]
fn test_month_key_uses_the_timestamps_own_offset() {
    // Same instant, two renderings: the month comes from the offset the
    // timestamp itself carries, so each string buckets deterministically.
    let utc = month_key("2024-04-01T04:30:00Z").unwrap();
    let offset = month_key("2024-03-31T23:30:00-05:00").unwrap();

    assert_eq!(utc, "April 2024");
    assert_eq!(offset, "March 2024");
}

#[test]
fn test_month_key_rejects_malformed_timestamps() {
    assert!(month_key("not-a-date").is_none());
    assert!(month_key("2024-03-05").is_none()); // date only, not RFC 3339
    assert!(month_key("").is_none());
}

#[test]
fn test_bucket_by_month_groups_tracks_by_added_month() {
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
        create_saved_track("c", "Track C", "2024-04-01T10:00:00Z"),
    ];

    let buckets = bucket_by_month(&tracks);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].name, "March 2024");
    assert_eq!(buckets[0].tracks.len(), 2);
    assert_eq!(buckets[1].name, "April 2024");
    assert_eq!(buckets[1].tracks.len(), 1);
}

#[test]
fn test_bucket_by_month_skips_unparsable_added_at() {
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("b", "Track B", "garbage"),
        create_saved_track("c", "Track C", "2024-03-20T10:00:00Z"),
    ];

    let buckets = bucket_by_month(&tracks);

    // The malformed track appears in no bucket at all
    assert_eq!(buckets.len(), 1);
    let uris: Vec<&str> = buckets[0]
        .tracks
        .iter()
        .map(|t| t.track.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["a", "c"]);
}

#[test]
fn test_bucket_by_month_preserves_fetch_order() {
    // Liked tracks arrive newest first; buckets keep first-seen order and
    // tracks keep their order within a bucket.
    let tracks = vec![
        create_saved_track("d", "Track D", "2024-04-10T10:00:00Z"),
        create_saved_track("c", "Track C", "2024-04-01T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
    ];

    let buckets = bucket_by_month(&tracks);

    assert_eq!(buckets[0].name, "April 2024");
    assert_eq!(buckets[1].name, "March 2024");

    let april: Vec<&str> = buckets[0]
        .tracks
        .iter()
        .map(|t| t.track.uri.as_str())
        .collect();
    assert_eq!(april, vec!["d", "c"]);

    let march: Vec<&str> = buckets[1]
        .tracks
        .iter()
        .map(|t| t.track.uri.as_str())
        .collect();
    assert_eq!(march, vec!["b", "a"]);
}

#[test]
fn test_is_monthly_name() {
    assert!(is_monthly_name("March 2024"));
    assert!(is_monthly_name("December 1999"));

    assert!(!is_monthly_name("Road Trip"));
    assert!(!is_monthly_name("March 24"));
    assert!(!is_monthly_name("March 2024 favs"));
    assert!(!is_monthly_name("March  2024")); // two spaces
    assert!(!is_monthly_name(""));
}

#[test]
fn test_index_monthly_playlists_filters_by_pattern() {
    let playlists = vec![
        create_playlist("p1", "March 2024"),
        create_playlist("p2", "Road Trip"),
        create_playlist("p3", "April 2024"),
    ];

    let index = index_monthly_playlists(&playlists);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get("March 2024").unwrap().id, "p1");
    assert_eq!(index.get("April 2024").unwrap().id, "p3");
    assert!(!index.contains_key("Road Trip"));
}

#[test]
fn test_index_monthly_playlists_later_duplicate_wins() {
    let playlists = vec![
        create_playlist("p1", "March 2024"),
        create_playlist("p2", "March 2024"),
    ];

    let index = index_monthly_playlists(&playlists);

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("March 2024").unwrap().id, "p2");
}

#[test]
fn test_plan_replaces_when_playlist_exists() {
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
    ];
    let buckets = bucket_by_month(&tracks);
    let index = index_monthly_playlists(&[create_playlist("p1", "March 2024")]);

    let steps = plan(&buckets, &index);

    // Exactly one replace-tracks write, zero create calls
    assert_eq!(steps.len(), 1);
    assert_eq!(
        steps[0],
        ReconcileStep::Replace {
            playlist_id: "p1".to_string(),
            name: "March 2024".to_string(),
            uris: vec!["a".to_string(), "b".to_string()],
        }
    );
}

#[test]
fn test_plan_creates_when_playlist_is_missing() {
    let tracks = vec![create_saved_track("c", "Track C", "2024-04-01T10:00:00Z")];
    let buckets = bucket_by_month(&tracks);
    let index = index_monthly_playlists(&[]);

    let steps = plan(&buckets, &index);

    // Exactly one create-playlist followed by its replace-tracks write
    assert_eq!(steps.len(), 1);
    assert_eq!(
        steps[0],
        ReconcileStep::CreateAndReplace {
            name: "April 2024".to_string(),
            uris: vec!["c".to_string()],
        }
    );
}

#[test]
fn test_plan_keeps_uri_order_and_duplicates() {
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("a", "Track A again", "2024-03-06T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
    ];
    let buckets = bucket_by_month(&tracks);

    let steps = plan(&buckets, &index_monthly_playlists(&[]));

    let ReconcileStep::CreateAndReplace { uris, .. } = &steps[0] else {
        panic!("expected a create step");
    };
    // Duplicates are not deduplicated; API-level semantics apply
    assert_eq!(uris, &vec!["a".to_string(), "a".to_string(), "b".to_string()]);
}

#[test]
fn test_plan_is_stable_across_runs() {
    // Replace semantics make the sync idempotent: unchanged buckets plan
    // the same full overwrite every run.
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
    ];
    let buckets = bucket_by_month(&tracks);
    let index = index_monthly_playlists(&[create_playlist("p1", "March 2024")]);

    let first = plan(&buckets, &index);
    let second = plan(&buckets, &index);

    assert_eq!(first, second);
}

#[test]
fn test_end_to_end_reconciliation_scenario() {
    let tracks = vec![
        create_saved_track("a", "Track A", "2024-03-05T10:00:00Z"),
        create_saved_track("b", "Track B", "2024-03-20T10:00:00Z"),
        create_saved_track("c", "Track C", "2024-04-01T10:00:00Z"),
    ];
    let playlists = vec![create_playlist("p1", "March 2024")];

    let buckets = bucket_by_month(&tracks);
    let index = index_monthly_playlists(&playlists);
    let steps = plan(&buckets, &index);

    assert_eq!(
        steps,
        vec![
            ReconcileStep::Replace {
                playlist_id: "p1".to_string(),
                name: "March 2024".to_string(),
                uris: vec!["a".to_string(), "b".to_string()],
            },
            ReconcileStep::CreateAndReplace {
                name: "April 2024".to_string(),
                uris: vec!["c".to_string()],
            },
        ]
    );
}
