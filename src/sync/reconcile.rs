use std::collections::HashMap;

use crate::{
    spotify,
    types::{MonthBucket, Playlist, ReconcileOutcome, ReconcileResult, ReconcileStep},
};

/// Decides create-vs-update for every month bucket.
///
/// For a bucket whose key has a matching existing playlist, the step is a
/// single replace-tracks write against that playlist's id. For a bucket
/// without one, the step is a create-playlist call followed by a
/// replace-tracks write against the created id. URIs are taken in bucket
/// order; duplicates are not deduplicated (API-level duplicate semantics
/// apply).
///
/// Pure function - the decision is separated from the writes so it can be
/// tested without a live network.
pub fn plan(
    buckets: &[MonthBucket],
    existing: &HashMap<String, Playlist>,
) -> Vec<ReconcileStep> {
    buckets
        .iter()
        .map(|bucket| {
            let uris: Vec<String> = bucket
                .tracks
                .iter()
                .map(|saved| saved.track.uri.clone())
                .collect();

            match existing.get(&bucket.name) {
                Some(playlist) => ReconcileStep::Replace {
                    playlist_id: playlist.id.clone(),
                    name: bucket.name.clone(),
                    uris,
                },
                None => ReconcileStep::CreateAndReplace {
                    name: bucket.name.clone(),
                    uris,
                },
            }
        })
        .collect()
}

/// Applies the planned writes, one bucket at a time.
///
/// Buckets are processed independently: a failed write is recorded in that
/// bucket's [`ReconcileResult`] and processing continues with the next
/// bucket. A playlist created right before a failing replace-tracks write
/// is not rolled back; the next sync finds it by name and retries the
/// replace.
pub async fn execute(
    token: &str,
    profile_id: &str,
    steps: Vec<ReconcileStep>,
) -> Vec<ReconcileResult> {
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        results.push(apply_step(token, profile_id, step).await);
    }
    results
}

async fn apply_step(token: &str, profile_id: &str, step: ReconcileStep) -> ReconcileResult {
    match step {
        ReconcileStep::Replace {
            playlist_id,
            name,
            uris,
        } => {
            let tracks = uris.len();
            let outcome = match spotify::playlist::replace_tracks(token, &playlist_id, &uris).await
            {
                Ok(_) => ReconcileOutcome::Replaced,
                Err(e) => ReconcileOutcome::Failed(e),
            };
            ReconcileResult {
                playlist: name,
                tracks,
                outcome,
            }
        }
        ReconcileStep::CreateAndReplace { name, uris } => {
            let tracks = uris.len();
            let outcome = match spotify::playlist::create(token, profile_id, &name).await {
                Ok(created) => {
                    match spotify::playlist::replace_tracks(token, &created.id, &uris).await {
                        Ok(_) => ReconcileOutcome::Created,
                        Err(e) => ReconcileOutcome::Failed(e),
                    }
                }
                Err(e) => ReconcileOutcome::Failed(e),
            };
            ReconcileResult {
                playlist: name,
                tracks,
                outcome,
            }
        }
    }
}
