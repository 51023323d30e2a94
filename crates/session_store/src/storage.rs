//! Session storage trait and the in-memory implementation

use crate::error::{Result, SessionError};
use crate::structs::SessionData;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session storage backend.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load a session.
    async fn load_session(&self, session_id: &str) -> Result<SessionData>;

    /// Save a session.
    async fn save_session(&self, session_id: &str, session: &SessionData) -> Result<()>;

    /// Check if a session exists.
    async fn session_exists(&self, session_id: &str) -> bool;

    /// Delete a session.
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

/// In-memory session storage. State lives for the life of the process only;
/// the service has no persistence story by design.
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load_session(&self, session_id: &str) -> Result<SessionData> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(SessionError::NotFound)
    }

    async fn save_session(&self, session_id: &str, session: &SessionData) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), session.clone());
        Ok(())
    }

    async fn session_exists(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_save_and_load() {
        let storage = MemorySessionStorage::new();

        let mut session = SessionData::default();
        session.lists.create_list("Groceries").unwrap();
        storage.save_session("test", &session).await.unwrap();

        let loaded = storage.load_session("test").await.unwrap();
        assert_eq!(session, loaded);
    }

    #[tokio::test]
    async fn test_memory_storage_not_found() {
        let storage = MemorySessionStorage::new();

        let result = storage.load_session("nonexistent").await;
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[tokio::test]
    async fn test_memory_storage_delete() {
        let storage = MemorySessionStorage::new();

        let session = SessionData::default();
        storage.save_session("test", &session).await.unwrap();

        assert!(storage.session_exists("test").await);

        storage.delete_session("test").await.unwrap();

        assert!(!storage.session_exists("test").await);
    }
}
