//! Persisted auth state.
//!
//! The platform provides an opaque async key-value store; this module
//! defines the trait the client codes against plus a typed wrapper for the
//! three keys the auth flow owns. `MemoryStorage` backs tests and the demo
//! binary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::auth::models::{AuthSession, User};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the persisted user record (JSON).
pub const USER_KEY: &str = "user";
/// Storage key for the id of the session this client runs under.
pub const CURRENT_SESSION_KEY: &str = "currentSessionId";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store failed.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A persisted record could not be encoded or decoded.
    #[error("Corrupt persisted record: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Async key-value store for persisted auth state.
///
/// Implementations wrap whatever the platform offers (browser local
/// storage, a keychain, a file). Values are opaque strings; semantics live
/// in [`AuthStore`].
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Read a value, `None` if the key was never saved or was removed.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Save a value, overwriting any previous one.
    async fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-process storage adapter.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Typed view over the auth keys of a [`StorageAdapter`].
///
/// All mutations are last-writer-wins; callers sequence them from the UI
/// event loop.
#[derive(Clone)]
pub struct AuthStore {
    adapter: Arc<dyn StorageAdapter>,
}

impl AuthStore {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    /// The persisted bearer token, if any.
    pub async fn token(&self) -> StorageResult<Option<String>> {
        self.adapter.get(TOKEN_KEY).await
    }

    /// The persisted user record, if any.
    pub async fn user(&self) -> StorageResult<Option<User>> {
        match self.adapter.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persist a full session: token and user together.
    pub async fn save_session(&self, session: &AuthSession) -> StorageResult<()> {
        log::debug!("Persisting session for user {}", session.user.id);
        self.adapter.save(TOKEN_KEY, &session.token).await?;
        self.save_user(&session.user).await
    }

    /// Overwrite the persisted user record, keeping the token.
    pub async fn save_user(&self, user: &User) -> StorageResult<()> {
        let encoded = serde_json::to_string(user)?;
        self.adapter.save(USER_KEY, &encoded).await
    }

    /// The id of the session this client runs under.
    pub async fn current_session_id(&self) -> StorageResult<Option<String>> {
        self.adapter.get(CURRENT_SESSION_KEY).await
    }

    pub async fn set_current_session_id(&self, session_id: &str) -> StorageResult<()> {
        self.adapter.save(CURRENT_SESSION_KEY, session_id).await
    }

    /// Drop every persisted auth key. After this the client must treat the
    /// user as unauthenticated.
    pub async fn clear(&self) -> StorageResult<()> {
        log::debug!("Clearing persisted auth state");
        self.adapter.remove(TOKEN_KEY).await?;
        self.adapter.remove(USER_KEY).await?;
        self.adapter.remove(CURRENT_SESSION_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(two_fa: bool) -> User {
        serde_json::from_str(&format!(
            r#"{{
                "id": "u-1",
                "nombre": "Ana",
                "nickname": "ana",
                "email": "ana@example.com",
                "twoFAEnabled": {two_fa}
            }}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("missing").await.unwrap().is_none());

        storage.save("k", "v1").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v1"));

        storage.save("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));

        storage.remove("k").await.unwrap();
        assert!(storage.get("k").await.unwrap().is_none());

        // Removing again is fine.
        storage.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_auth_store_session_roundtrip() {
        let store = AuthStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.token().await.unwrap().is_none());
        assert!(store.user().await.unwrap().is_none());

        let session = AuthSession {
            token: "tok-123".to_string(),
            user: sample_user(true),
        };
        store.save_session(&session).await.unwrap();

        assert_eq!(store.token().await.unwrap().as_deref(), Some("tok-123"));
        let user = store.user().await.unwrap().unwrap();
        assert_eq!(user.id, "u-1");
        assert!(user.two_fa_enabled);
    }

    #[tokio::test]
    async fn test_save_user_keeps_token() {
        let store = AuthStore::new(Arc::new(MemoryStorage::new()));
        let session = AuthSession {
            token: "tok-123".to_string(),
            user: sample_user(false),
        };
        store.save_session(&session).await.unwrap();

        let mut updated = sample_user(false);
        updated.nickname = "ana_v2".to_string();
        store.save_user(&updated).await.unwrap();

        assert_eq!(store.token().await.unwrap().as_deref(), Some("tok-123"));
        assert_eq!(store.user().await.unwrap().unwrap().nickname, "ana_v2");
    }

    #[tokio::test]
    async fn test_clear_removes_all_auth_keys() {
        let store = AuthStore::new(Arc::new(MemoryStorage::new()));
        let session = AuthSession {
            token: "tok-123".to_string(),
            user: sample_user(false),
        };
        store.save_session(&session).await.unwrap();
        store.set_current_session_id("sess-9").await.unwrap();

        store.clear().await.unwrap();

        assert!(store.token().await.unwrap().is_none());
        assert!(store.user().await.unwrap().is_none());
        assert!(store.current_session_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_user_record_is_an_encoding_error() {
        let storage = MemoryStorage::new();
        storage.save(USER_KEY, "{not json").await.unwrap();

        let store = AuthStore::new(Arc::new(storage));
        let err = store.user().await.unwrap_err();
        assert!(matches!(err, StorageError::Encoding(_)));
    }
}
