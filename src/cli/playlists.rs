use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::{AuthError, CacheManager, TokenManager},
    spotify,
    sync::matcher,
    types::PlaylistTableRow,
};

pub async fn playlists() {
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
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let all = match spotify::playlist::get_user_playlists(&token.access_token).await {
        Ok(all) => {
            pb.finish_and_clear();
            all
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists: {:?}", e);
        }
    };

    // keep fetch order; the name index would lose it
    let rows: Vec<PlaylistTableRow> = all
        .iter()
        .filter(|p| matcher::is_monthly_name(&p.name))
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            tracks: p
                .tracks
                .as_ref()
                .map(|t| t.total.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    if rows.is_empty() {
        info!("No monthly playlists found. Run spomocli sync to create them.");
        return;
    }

    let table = Table::new(rows);
    println!("{}", table);
}
