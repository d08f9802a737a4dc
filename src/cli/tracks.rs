use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error, info,
    management::{AuthError, CacheManager, TokenManager},
    sync,
    types::TrackTableRow,
    utils, warning,
};

pub async fn tracks(month: Option<String>) {
    let cache = CacheManager::new();
    let token_mgr = TokenManager::new(CacheManager::new());

    let token = match token_mgr.ensure_valid().await {
        Ok(token) => token,
        Err(AuthError::NotConnected) => {
            error!("Not connected to Spotify. Please run spomocli auth");
        }
        Err(e) => {
            error!(
                "Authorization failed: {:?}\nPlease run spomocli auth to reconnect.",
                e
            );
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching liked tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let profile = match sync::engine::get_profile(&cache, &token).await {
        Ok(profile) => profile,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch profile: {:?}", e);
        }
    };

    let liked = match sync::engine::get_liked_tracks(&cache, &token, config::max_liked_tracks()).await
    {
        Ok(liked) => {
            pb.finish_and_clear();
            liked
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch liked tracks: {:?}", e);
        }
    };

    info!(
        "Liked tracks for {}",
        profile.display_name.as_deref().unwrap_or(&profile.id)
    );

    let buckets = sync::bucket_by_month(&liked);

    let mut shown = 0;
    for bucket in buckets {
        if let Some(filter) = &month {
            if bucket.name != *filter {
                continue;
            }
        }

        let rows: Vec<TrackTableRow> = bucket
            .tracks
            .iter()
            .map(|saved| TrackTableRow {
                added: saved.added_at.clone(),
                name: saved.track.name.clone(),
                artists: utils::join_artist_names(&saved.track.artists),
            })
            .collect();

        let table = Table::new(rows);
        println!("{name}\n{table}\n", name = bucket.name, table = table);
        shown += 1;
    }

    if shown == 0 {
        match month {
            Some(filter) => warning!("No liked tracks found for {}.", filter),
            None => info!("No liked tracks found."),
        }
    }
}
