use std::{io::Error, path::PathBuf, time::Duration};

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

/// Envelope written around every cached value.
///
/// `expires_at` is a unix timestamp; `None` means the entry never expires
/// (used for the credential, whose lifetime is tracked by the token itself).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheEntry<T> {
    pub expires_at: Option<u64>,
    pub value: T,
}

impl<T> CacheEntry<T> {
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expires_at {
            Some(at) => now >= at,
            None => false,
        }
    }
}

/// Keyed JSON cache with per-entry TTLs.
///
/// Each key is stored as one file in the local data directory, the same
/// persistence scheme used for the credential. An expired entry behaves as
/// absent on `get`; the stale file is left behind and overwritten by the
/// next `put`.
pub struct CacheManager {
    root: PathBuf,
}

impl CacheManager {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("spomocli/cache");
        Self { root }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = async_fs::read_to_string(self.entry_path(key)).await.ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;
        let now = Utc::now().timestamp() as u64;
        if entry.is_expired_at(now) {
            return None;
        }
        Some(entry.value)
    }

    pub async fn put<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(CacheError::IoError)?;
        }

        let now = Utc::now().timestamp() as u64;
        let entry = CacheEntry {
            expires_at: ttl.map(|ttl| now + ttl.as_secs()),
            value,
        };
        let json = serde_json::to_string_pretty(&entry).map_err(CacheError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(CacheError::IoError)
    }

    pub async fn forget(&self, key: &str) -> Result<(), CacheError> {
        match async_fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
