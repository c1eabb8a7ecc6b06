//! Persistent storage of the access/refresh token pair
//!
//! Tokens are kept as plain strings under two keys so they survive page
//! reloads. The session is considered authenticated as soon as an access
//! token is present; nothing here looks inside the tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token pair returned by sign-in, sign-up, refresh and the OAuth callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Which of the two tokens to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn key(&self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_TOKEN_KEY,
            TokenKind::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Persistent storage is not available")]
    Unavailable,

    #[error("Failed to write {key}: {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Key-value backend for the token store
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory storage, used by the server build and tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

/// Browser `localStorage`
///
/// Looks the storage up on every call, so the handle itself holds no JS
/// objects and can live in shared contexts.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(feature = "hydrate")]
impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Token store over a storage backend
#[derive(Debug, Default)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: TokenStorage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist both tokens
    ///
    /// Either both keys are written or the store ends up empty: a failed
    /// refresh-token write removes the access token just written.
    pub fn save(&self, pair: &TokenPair) -> Result<(), StorageError> {
        self.storage.set(ACCESS_TOKEN_KEY, &pair.access_token)?;
        if let Err(err) = self.storage.set(REFRESH_TOKEN_KEY, &pair.refresh_token) {
            tracing::warn!("Failed to persist refresh token, discarding pair: {}", err);
            self.clear();
            return Err(err);
        }
        Ok(())
    }

    /// Read one token; empty values count as absent
    pub fn read(&self, kind: TokenKind) -> Option<String> {
        self.storage.get(kind.key()).filter(|t| !t.is_empty())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(TokenKind::Access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(TokenKind::Refresh)
    }

    /// Erase all session data; no-op on an empty store
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }

    /// True iff an access token is present
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
