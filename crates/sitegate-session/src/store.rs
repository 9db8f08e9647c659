//! Session storage abstraction.
//!
//! [`SessionStore`] abstracts the durable storage the session survives
//! restarts in. The contract mirrors browser local storage: three
//! independent keys (`user`, `tenant`, `token`) that are written together
//! by login and cleared together by logout, but may individually be
//! missing or stale when a process starts, which is exactly what
//! `verify` exists to resolve.

use crate::error::StorageError;
use crate::state::{AuthSession, BearerToken};
use sitegate_types::{PrincipalRecord, Tenant};
use std::future::Future;

/// Whatever the durable storage held at load time.
///
/// Unlike [`AuthSession`], this type makes no togetherness guarantee: a
/// crash between writes, manual file edits, or an older process version can
/// leave any subset populated. `verify` treats anything short of a token as
/// "no session".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSession {
    /// The `user` key: the principal in backend wire form.
    pub user: Option<PrincipalRecord>,
    /// The `tenant` key.
    pub tenant: Option<Tenant>,
    /// The `token` key.
    pub token: Option<BearerToken>,
}

impl PersistedSession {
    /// Returns `true` when nothing is persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.tenant.is_none() && self.token.is_none()
    }

    /// Returns the persisted token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }
}

/// Durable session storage.
///
/// Implementations must be thread-safe (`Send + Sync`) for use across async
/// tasks. All operations are async; storage failures surface as
/// [`StorageError`].
///
/// # Example
///
/// ```no_run
/// use sitegate_session::{SessionStore, StorageError};
///
/// async fn wipe(store: &impl SessionStore) -> Result<(), StorageError> {
///     store.clear().await
/// }
/// ```
pub trait SessionStore: Send + Sync {
    /// Persists the full triple (user, tenant, token) together.
    ///
    /// An existing persisted session is overwritten.
    fn save(&self, session: &AuthSession)
        -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Loads whatever the storage currently holds.
    ///
    /// Missing keys load as `None`; a key that exists but fails to parse is
    /// an error (the caller treats it as an invalid session).
    fn load(&self) -> impl Future<Output = Result<PersistedSession, StorageError>> + Send;

    /// Removes all three keys. Idempotent: clearing empty storage succeeds.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
