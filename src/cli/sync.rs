use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    management::{AuthError, CacheManager, TokenManager},
    success,
    sync::{self, SyncError, engine::LIKED_TRACKS_CACHE_KEY},
    types::{ReconcileOutcome, SummaryTableRow},
    warning,
};

pub async fn sync(force: bool) {
    let cache = CacheManager::new();

    if force {
        if let Err(e) = cache.forget(LIKED_TRACKS_CACHE_KEY).await {
            warning!("Failed to drop cached liked tracks: {:?}", e);
        }
    }

    let token_mgr = TokenManager::new(CacheManager::new());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Syncing liked tracks into monthly playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match sync::run(&token_mgr, &cache, config::max_liked_tracks()).await {
        Ok(summary) => {
            pb.finish_and_clear();

            let rows: Vec<SummaryTableRow> = summary
                .results
                .iter()
                .map(|r| SummaryTableRow {
                    playlist: r.playlist.clone(),
                    tracks: r.tracks,
                    outcome: match &r.outcome {
                        ReconcileOutcome::Replaced => "updated".to_string(),
                        ReconcileOutcome::Created => "created".to_string(),
                        ReconcileOutcome::Failed(e) => format!("failed: {:?}", e),
                    },
                })
                .collect();

            let table = Table::new(rows);
            println!("{}", table);

            let failed = summary
                .results
                .iter()
                .filter(|r| matches!(r.outcome, ReconcileOutcome::Failed(_)))
                .count();

            if failed > 0 {
                warning!(
                    "{} of {} monthly playlists failed to update. Run spomocli sync again.",
                    failed,
                    summary.results.len()
                );
            } else {
                success!(
                    "Sorted {} liked tracks into {} monthly playlists.",
                    summary.tracks_considered,
                    summary.results.len()
                );
            }
        }
        Err(SyncError::Auth(AuthError::NotConnected)) => {
            pb.finish_and_clear();
            error!("Not connected to Spotify. Please run spomocli auth");
        }
        Err(SyncError::Auth(e)) => {
            pb.finish_and_clear();
            error!(
                "Authorization failed: {:?}\nPlease run spomocli auth to reconnect.",
                e
            );
        }
        Err(SyncError::Fetch(e)) => {
            pb.finish_and_clear();
            error!("Sync aborted: {:?}", e);
        }
    }
}
