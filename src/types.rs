use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::spotify::WriteError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Whether the token must be refreshed before it is used for a request.
    ///
    /// A token counts as expired four minutes before its actual expiry so
    /// that a request started near the boundary never goes out with a
    /// token the API already rejects.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.obtained_at + self.expires_in.saturating_sub(240)
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

/// One page of a paginated Spotify collection.
///
/// Every paginated endpoint used here (`/me/tracks`, `/me/playlists`)
/// returns its items under `items` together with an absolute `next` URL
/// when further pages exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: String,
    pub track: TrackInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub uri: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// All liked tracks added during one month, keyed `"<Month> <Year>"`.
///
/// Buckets preserve the first-seen order of the fetch, and tracks within a
/// bucket preserve fetch order (most recently liked first).
#[derive(Debug, Clone)]
pub struct MonthBucket {
    pub name: String,
    pub tracks: Vec<SavedTrack>,
}

/// One planned write against the monthly playlist set.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileStep {
    /// The month already has a playlist; overwrite its full track list.
    Replace {
        playlist_id: String,
        name: String,
        uris: Vec<String>,
    },
    /// No playlist for the month yet; create it, then set its track list.
    CreateAndReplace { name: String, uris: Vec<String> },
}

#[derive(Debug)]
pub enum ReconcileOutcome {
    Replaced,
    Created,
    Failed(WriteError),
}

#[derive(Debug)]
pub struct ReconcileResult {
    pub playlist: String,
    pub tracks: usize,
    pub outcome: ReconcileOutcome,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub tracks_considered: usize,
    pub results: Vec<ReconcileResult>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub added: String,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub tracks: String,
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    pub playlist: String,
    pub tracks: usize,
    pub outcome: String,
}
