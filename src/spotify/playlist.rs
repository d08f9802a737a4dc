use reqwest::{Client, StatusCode};

use crate::{
    config,
    spotify::{FetchError, pager},
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, Playlist, ReplaceTracksRequest,
        SnapshotResponse,
    },
};

#[derive(Debug)]
pub enum WriteError {
    /// The request never produced an HTTP status (connect, timeout, decode).
    Network(String),
    /// The API answered with a non-success status.
    Http(StatusCode),
}

impl From<reqwest::Error> for WriteError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => WriteError::Http(status),
            None => WriteError::Network(err.to_string()),
        }
    }
}

/// Retrieves all of the user's playlists, exhaustively paginated.
///
/// No stop condition: the playlist matcher has to see the full set to
/// decide create-vs-update per month.
pub async fn get_user_playlists(token: &str) -> Result<Vec<Playlist>, FetchError> {
    let start_url = format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    );
    pager::fetch_all(token, &start_url, None).await
}

/// Creates a private playlist owned by `user_id`.
///
/// Returns the created playlist's id, which the caller immediately targets
/// with a replace-tracks write.
pub async fn create(
    token: &str,
    user_id: &str,
    name: &str,
) -> Result<CreatePlaylistResponse, WriteError> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: format!("Liked tracks from {}.", name),
        public: false,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Replaces a playlist's full track list with the given URIs.
///
/// This is a full overwrite, not an append: running the same replace twice
/// leaves the playlist with the same track list, which is what makes the
/// monthly sync idempotent.
pub async fn replace_tracks(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<String, WriteError> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let request = ReplaceTracksRequest {
        uris: uris.to_vec(),
    };

    let client = Client::new();
    let response = client
        .put(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let snapshot = response.json::<SnapshotResponse>().await?;
    Ok(snapshot.snapshot_id)
}
