use std::collections::HashMap;

use chrono::DateTime;

use crate::types::{MonthBucket, SavedTrack};

/// Derives the bucket key for a saved track's `added_at` timestamp.
///
/// Parses strictly as RFC 3339 and formats the parsed instant (in its own
/// UTC offset) as `"<Month> <Year>"`. chrono's `%B` month names are English
/// regardless of locale, which keeps bucket keys identical to the playlist
/// names produced on earlier runs.
///
/// Returns `None` for an unparsable timestamp; the track is then excluded
/// from every bucket.
pub fn month_key(added_at: &str) -> Option<String> {
    let added = DateTime::parse_from_rfc3339(added_at).ok()?;
    Some(added.format("%B %Y").to_string())
}

/// Groups liked tracks into buckets keyed by the month they were added.
///
/// Each track with a valid `added_at` lands in exactly one bucket,
/// deterministically, regardless of fetch order. Buckets appear in
/// first-seen order of the input sequence and tracks keep their fetch
/// order within a bucket, so a newest-first track list yields
/// newest-month-first buckets. Tracks with a malformed `added_at` are
/// skipped silently - a data-shape decision, not an error.
///
/// Pure function, no I/O.
pub fn bucket_by_month(tracks: &[SavedTrack]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(name) = month_key(&track.added_at) else {
            continue;
        };

        match index.get(&name) {
            Some(&at) => buckets[at].tracks.push(track.clone()),
            None => {
                index.insert(name.clone(), buckets.len());
                buckets.push(MonthBucket {
                    name,
                    tracks: vec![track.clone()],
                });
            }
        }
    }

    buckets
}
