use reqwest::Client;

use crate::{config, spotify::FetchError, types::UserProfile};

/// Retrieves the authenticated user's profile from the Spotify Web API.
///
/// A single unpaginated call; the profile supplies the owner id for
/// playlist-creation requests.
pub async fn get_profile(token: &str) -> Result<UserProfile, FetchError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<UserProfile>().await?)
}
