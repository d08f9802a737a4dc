use crate::{
    config,
    spotify::{FetchError, pager},
    types::SavedTrack,
};

/// Retrieves the user's liked tracks, newest first, capped at `max_items`.
///
/// Follows the `/me/tracks` pagination until the library is exhausted or
/// the accumulated count reaches the cap. The API returns saved tracks in
/// reverse-chronological order of their `added_at` timestamp, which the
/// month bucketer preserves.
///
/// # Errors
///
/// A failure on any page aborts the whole fetch; no partial track list is
/// returned.
pub async fn get_liked_tracks(token: &str, max_items: usize) -> Result<Vec<SavedTrack>, FetchError> {
    let start_url = format!("{uri}/me/tracks?limit=50", uri = &config::spotify_apiurl());
    pager::fetch_all(token, &start_url, Some(max_items)).await
}
