//! Per-request session context

use crate::error::{Result, SessionError};
use crate::storage::SessionStorage;
use crate::structs::SessionData;
use log::debug;
use std::sync::Arc;

/// Session state scoped to a single request: loaded once at the start,
/// mutated in place, written back with [`SessionContext::commit`]. Handlers
/// receive this instead of touching a process-wide store.
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
    session_id: String,
    data: SessionData,
}

impl SessionContext {
    /// Load the session for `session_id`, creating fresh empty state when
    /// the id is unknown (first touch, or server state expired with the
    /// process).
    pub async fn load(storage: Arc<dyn SessionStorage>, session_id: String) -> Result<Self> {
        let data = match storage.load_session(&session_id).await {
            Ok(data) => data,
            Err(SessionError::NotFound) => {
                debug!("Starting fresh session state for {}", session_id);
                SessionData::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            session_id,
            data,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SessionData {
        &mut self.data
    }

    /// Write the (possibly mutated) state back to storage.
    pub async fn commit(&self) -> Result<()> {
        self.storage
            .save_session(&self.session_id, &self.data)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStorage;

    #[tokio::test]
    async fn test_load_unknown_id_yields_empty_state() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());
        let ctx = SessionContext::load(storage, "fresh".to_string())
            .await
            .unwrap();

        assert!(ctx.data().lists.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_survive_commit_and_reload() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());

        let mut ctx = SessionContext::load(Arc::clone(&storage), "s1".to_string())
            .await
            .unwrap();
        ctx.data_mut().lists.create_list("Groceries").unwrap();
        ctx.data_mut().set_success("The list has been created.");
        ctx.commit().await.unwrap();

        let reloaded = SessionContext::load(storage, "s1".to_string())
            .await
            .unwrap();
        assert_eq!(reloaded.data().lists.len(), 1);
        assert_eq!(
            reloaded.data().success.as_deref(),
            Some("The list has been created.")
        );
    }

    #[tokio::test]
    async fn test_uncommitted_mutations_are_dropped() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());

        let mut ctx = SessionContext::load(Arc::clone(&storage), "s1".to_string())
            .await
            .unwrap();
        ctx.data_mut().lists.create_list("Groceries").unwrap();
        // No commit.

        let reloaded = SessionContext::load(storage, "s1".to_string())
            .await
            .unwrap();
        assert!(reloaded.data().lists.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());

        let mut a = SessionContext::load(Arc::clone(&storage), "a".to_string())
            .await
            .unwrap();
        a.data_mut().lists.create_list("Groceries").unwrap();
        a.commit().await.unwrap();

        let b = SessionContext::load(storage, "b".to_string()).await.unwrap();
        assert!(b.data().lists.is_empty());
    }
}
