use std::time::Duration;

use crate::{
    management::{AuthError, CacheManager, TokenManager},
    spotify::{self, FetchError},
    sync::{bucket, matcher, reconcile},
    types::{SavedTrack, SyncSummary, Token, UserProfile},
    warning,
};

pub const LIKED_TRACKS_CACHE_KEY: &str = "liked-tracks";
pub const PROFILE_CACHE_KEY: &str = "profile";

const LIKED_TRACKS_TTL: Duration = Duration::from_secs(60 * 60);
const PROFILE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug)]
pub enum SyncError {
    /// The credential check failed; the caller should send the user back
    /// through the authorization flow.
    Auth(AuthError),
    /// A fetch step failed; no partial track or playlist data is used.
    Fetch(FetchError),
}

impl From<AuthError> for SyncError {
    fn from(err: AuthError) -> Self {
        SyncError::Auth(err)
    }
}

impl From<FetchError> for SyncError {
    fn from(err: FetchError) -> Self {
        SyncError::Fetch(err)
    }
}

/// Runs one end-to-end sync of liked tracks into monthly playlists.
///
/// Sequence: ensure a valid credential (an `AuthError` aborts immediately,
/// no partial sync), fetch the profile and the capped liked-tracks history
/// (both memoized through the keyed cache), fetch all playlists
/// exhaustively, bucket the tracks by month, match the existing monthly
/// playlists, then reconcile each bucket. Per-bucket write failures are
/// recorded in the summary and do not abort the remaining buckets.
pub async fn run(
    token_mgr: &TokenManager,
    cache: &CacheManager,
    max_tracks: usize,
) -> Result<SyncSummary, SyncError> {
    let token = token_mgr.ensure_valid().await?;

    let profile = get_profile(cache, &token).await?;
    let tracks = get_liked_tracks(cache, &token, max_tracks).await?;
    let playlists = spotify::playlist::get_user_playlists(&token.access_token).await?;

    let buckets = bucket::bucket_by_month(&tracks);
    let existing = matcher::index_monthly_playlists(&playlists);

    let steps = reconcile::plan(&buckets, &existing);
    let results = reconcile::execute(&token.access_token, &profile.id, steps).await;

    Ok(SyncSummary {
        tracks_considered: tracks.len(),
        results,
    })
}

/// Returns the user profile, memoized for a week.
///
/// The profile only supplies the owner id for playlist creation and
/// changes rarely, so it gets the longest TTL.
pub async fn get_profile(
    cache: &CacheManager,
    token: &Token,
) -> Result<UserProfile, FetchError> {
    if let Some(profile) = cache.get::<UserProfile>(PROFILE_CACHE_KEY).await {
        return Ok(profile);
    }

    let profile = spotify::user::get_profile(&token.access_token).await?;
    if let Err(e) = cache.put(PROFILE_CACHE_KEY, &profile, Some(PROFILE_TTL)).await {
        warning!("Failed to cache profile: {:?}", e);
    }
    Ok(profile)
}

/// Returns the liked-tracks history, memoized for an hour.
///
/// A fresh fetch follows `/me/tracks` pagination up to `max_tracks`; the
/// cached copy keeps repeated syncs within the hour from re-walking the
/// library.
pub async fn get_liked_tracks(
    cache: &CacheManager,
    token: &Token,
    max_tracks: usize,
) -> Result<Vec<SavedTrack>, FetchError> {
    if let Some(tracks) = cache.get::<Vec<SavedTrack>>(LIKED_TRACKS_CACHE_KEY).await {
        return Ok(tracks);
    }

    let tracks = spotify::tracks::get_liked_tracks(&token.access_token, max_tracks).await?;
    if let Err(e) = cache
        .put(LIKED_TRACKS_CACHE_KEY, &tracks, Some(LIKED_TRACKS_TTL))
        .await
    {
        warning!("Failed to cache liked tracks: {:?}", e);
    }
    Ok(tracks)
}
