//! In-memory session storage.

use crate::error::StorageError;
use crate::state::AuthSession;
use crate::store::{PersistedSession, SessionStore};
use parking_lot::RwLock;
use sitegate_types::PrincipalRecord;

/// Non-durable store backed by process memory.
///
/// Used by tests and by embeddings that do not want sessions to survive a
/// restart (the triple-together semantics still hold).
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<PersistedSession>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    async fn save(&self, session: &AuthSession) -> Result<(), StorageError> {
        *self.inner.write() = PersistedSession {
            user: Some(PrincipalRecord::from(session.principal())),
            tenant: session.tenant().cloned(),
            token: Some(session.token().clone()),
        };
        Ok(())
    }

    async fn load(&self) -> Result<PersistedSession, StorageError> {
        Ok(self.inner.read().clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.inner.write() = PersistedSession::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BearerToken;
    use sitegate_types::{Principal, Role, UserId};

    fn session() -> AuthSession {
        AuthSession::new(
            Principal::new(UserId::new("u-1"), "Ada", "ada@example.com", Role::Admin),
            None,
            BearerToken::new("tok"),
        )
    }

    #[tokio::test]
    async fn save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().await.expect("load").is_empty());

        store.save(&session()).await.expect("save");
        let persisted = store.load().await.expect("load");
        assert!(persisted.token().is_some());
        assert!(persisted.user.is_some());

        store.clear().await.expect("clear");
        assert!(store.load().await.expect("load").is_empty());

        // Idempotent.
        store.clear().await.expect("clear again");
    }
}
