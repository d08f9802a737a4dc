use chrono::Utc;
use tokio::sync::Mutex;

use crate::{management::CacheManager, spotify, types::Token};

pub const TOKEN_CACHE_KEY: &str = "token";

#[derive(Debug)]
pub enum AuthError {
    /// No credential is stored; the user has to run the authorization flow.
    NotConnected,
    /// The authorization-code exchange was rejected or never reached the
    /// token endpoint.
    ExchangeFailed(String),
    /// The refresh-grant exchange failed; the stored (expired) credential is
    /// left untouched so the caller can decide to re-authorize.
    RefreshFailed(String),
}

/// Owns the Spotify credential and its lifecycle.
///
/// The credential is persisted through the keyed cache and only ever
/// replaced wholesale: a successful exchange or refresh overwrites the full
/// token, a failed one leaves the previous token in place. The refresh path
/// is serialized behind a lock because Spotify invalidates a refresh token
/// on first use; two overlapping refreshes would corrupt the stored
/// credential.
pub struct TokenManager {
    cache: CacheManager,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the currently persisted credential, if any.
    pub async fn get(&self) -> Option<Token> {
        self.cache.get::<Token>(TOKEN_CACHE_KEY).await
    }

    /// Returns a credential that is valid for at least the next request.
    ///
    /// An expired credential triggers exactly one refresh-grant exchange;
    /// the new token is persisted before it is returned. Concurrent callers
    /// that hit the expiry at the same time queue on the refresh lock and
    /// observe the already-refreshed token instead of refreshing again.
    ///
    /// # Errors
    ///
    /// - `AuthError::NotConnected` - no credential is stored
    /// - `AuthError::RefreshFailed` - the provider rejected the refresh
    ///   token or the exchange did not complete; never retried here
    pub async fn ensure_valid(&self) -> Result<Token, AuthError> {
        let token = self.get().await.ok_or(AuthError::NotConnected)?;
        if !token.is_expired_at(Utc::now().timestamp() as u64) {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Re-read under the lock: a racing caller may have refreshed already.
        let current = self.get().await.ok_or(AuthError::NotConnected)?;
        if !current.is_expired_at(Utc::now().timestamp() as u64) {
            return Ok(current);
        }

        let refreshed = spotify::auth::refresh_grant(&current).await?;
        self.persist(&refreshed)
            .await
            .map_err(AuthError::RefreshFailed)?;
        Ok(refreshed)
    }

    /// Exchanges a one-time authorization code for a fresh credential and
    /// persists it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ExchangeFailed` on any provider error (invalid or
    /// expired code, network failure). The exchange is surfaced once, not
    /// retried.
    pub async fn set_from_authorization_code(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<Token, AuthError> {
        let token = spotify::auth::exchange_code_pkce(code, verifier).await?;
        self.persist(&token)
            .await
            .map_err(AuthError::ExchangeFailed)?;
        Ok(token)
    }

    async fn persist(&self, token: &Token) -> Result<(), String> {
        self.cache
            .put(TOKEN_CACHE_KEY, token, None)
            .await
            .map_err(|e| format!("failed to persist token: {:?}", e))
    }
}
