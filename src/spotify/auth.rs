use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::AuthError,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// Initiates the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating PKCE code verifier and challenge
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback to persist the obtained token
///
/// The PKCE (Proof Key for Code Exchange) flow provides enhanced security
/// for OAuth flows without requiring a client secret to be stored securely.
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state for storing PKCE information
///   and the resulting token between the auth flow and callback handler
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope()
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(_) => {
            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared state for a completed authentication token with a
/// 60-second timeout. This function runs concurrently with the callback
/// handler that populates the token after successful OAuth exchange.
///
/// # Returns
///
/// Returns `Some(Token)` if authentication completes successfully within
/// the timeout period, or `None` if the timeout is reached without a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Refreshes an expired access token using its refresh token.
///
/// Exchanges the refresh token for a new access token when the current
/// token has expired, so authenticated access continues without the user
/// re-authorizing.
///
/// # Errors
///
/// Returns `AuthError::RefreshFailed` when the token endpoint is
/// unreachable, rejects the refresh token, or answers with a malformed
/// token response. The exchange is attempted exactly once.
pub async fn refresh_grant(token: &Token) -> Result<Token, AuthError> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", &token.refresh_token),
            ("client_id", &config::spotify_client_id()),
        ])
        .send()
        .await
        .map_err(|e| AuthError::RefreshFailed(e.to_string()))?
        .error_for_status()
        .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

    let json: Value = res
        .json()
        .await
        .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

    token_from_response(&json, Some(&token.refresh_token))
        .ok_or_else(|| AuthError::RefreshFailed("malformed token response".to_string()))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token. The code verifier proves
/// that the same client that initiated the auth flow is completing it.
///
/// # Errors
///
/// Returns `AuthError::ExchangeFailed` on any provider error: an invalid or
/// expired authorization code, a verifier that doesn't match the challenge,
/// a network failure, or a malformed token response.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, AuthError> {
    let client_id = &config::spotify_client_id();
    let redirect_uri = &config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?
        .error_for_status()
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    let json: Value = res
        .json()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    token_from_response(&json, None)
        .ok_or_else(|| AuthError::ExchangeFailed("malformed token response".to_string()))
}

/// Builds a [`Token`] from a token-endpoint response body.
///
/// A refresh-grant response may omit `refresh_token`; in that case the
/// previous refresh token is carried over so the credential stays complete.
/// Returns `None` when `access_token` is missing, which both exchanges
/// treat as a failed response.
pub fn token_from_response(json: &Value, previous_refresh_token: Option<&str>) -> Option<Token> {
    let refresh_token = json["refresh_token"]
        .as_str()
        .or(previous_refresh_token)?
        .to_string();

    Some(Token {
        access_token: json["access_token"].as_str()?.to_string(),
        refresh_token,
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
