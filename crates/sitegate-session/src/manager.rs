//! The session manager.
//!
//! One [`SessionManager`] exists per process. It is the only writer of the
//! session state: `login`, `logout`/`invalidate`, and the completion of
//! `verify` are the exclusive mutation paths, which is what keeps the
//! principal/token pair from ever being written by two independent code
//! paths into an inconsistent shape.
//!
//! Construct it explicitly and hand it to consumers (screens, dispatchers)
//! rather than reaching for ambient globals; initialization order is then
//! visible at the wiring site: build, `verify().await`, then render.

use crate::api::AuthApi;
use crate::error::SessionError;
use crate::state::{AuthSession, SessionState};
use crate::store::SessionStore;
use parking_lot::RwLock;
use sitegate_types::{CapabilityRegistry, Principal, Role};

/// Owns the current principal/tenant/token triple and its persistence.
///
/// # Concurrency
///
/// Interior state is behind an [`RwLock`]; reads (`state`, `principal`,
/// `is_authenticated`) are synchronous and cheap. [`verify`] runs at most
/// once per process lifetime, at startup, and is not re-entrant; callers
/// must serialize calls to it.
///
/// [`verify`]: Self::verify
///
/// # Example
///
/// ```no_run
/// use sitegate_session::{LocalFileStore, SessionManager};
/// use std::path::PathBuf;
///
/// # async fn example(auth: impl sitegate_session::AuthApi) -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalFileStore::new(PathBuf::from("~/.sitegate/session"))?;
/// let sessions = SessionManager::new(store, auth);
///
/// // Nothing is authoritative until verify settles.
/// assert!(sessions.is_loading());
/// sessions.verify().await?;
/// assert!(!sessions.is_loading());
/// # Ok(())
/// # }
/// ```
pub struct SessionManager<S, A> {
    store: S,
    auth: A,
    registry: CapabilityRegistry,
    state: RwLock<SessionState>,
}

impl<S: SessionStore, A: AuthApi> SessionManager<S, A> {
    /// Creates a manager in the [`SessionState::Unresolved`] state, with
    /// the builtin capability registry.
    #[must_use]
    pub fn new(store: S, auth: A) -> Self {
        Self::with_registry(store, auth, CapabilityRegistry::with_builtins())
    }

    /// Creates a manager with a custom capability registry.
    ///
    /// The registry is consulted whenever an authoritative principal
    /// arrives: unknown names in a custom permission set are logged at
    /// `warn` (a backend typo should be diagnosable, not lock anyone out).
    #[must_use]
    pub fn with_registry(store: S, auth: A, registry: CapabilityRegistry) -> Self {
        Self {
            store,
            auth,
            registry,
            state: RwLock::new(SessionState::Unresolved),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Returns the current principal, if authenticated.
    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        self.state.read().principal().cloned()
    }

    /// Returns `true` when a principal is present. Pure synchronous check.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Returns `true` until [`verify`](Self::verify) has settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    /// Replaces the session with the given triple and persists it.
    ///
    /// Persistence happens first; on storage failure the in-memory state is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the triple cannot be persisted.
    pub async fn login(&self, session: AuthSession) -> Result<(), SessionError> {
        self.check_grants(session.principal());
        self.store.save(&session).await?;
        tracing::info!(principal = %session.principal(), "session established");
        *self.state.write() = SessionState::Authenticated(session);
        Ok(())
    }

    /// Exchanges credentials with the auth service and establishes the
    /// resulting session.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Login`] if the auth service refuses the exchange.
    /// - [`SessionError::Wire`] if the returned user has an unknown role.
    /// - [`SessionError::Storage`] if persisting the triple fails.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, SessionError> {
        let response = self
            .auth
            .login(email, password)
            .await
            .map_err(SessionError::Login)?;

        let principal = Principal::try_from(response.user)?;
        let session = AuthSession::new(principal.clone(), response.tenant, response.token);
        self.login(session).await?;
        Ok(principal)
    }

    /// Clears the session from memory and durable storage. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if clearing storage fails; memory
    /// is cleared regardless, so the process itself is always logged out.
    pub async fn logout(&self) -> Result<(), SessionError> {
        tracing::info!("logout requested");
        self.invalidate().await
    }

    /// Boundary-level session clearing (used by logout and by any
    /// collaborator answering 401). Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if clearing storage fails.
    pub async fn invalidate(&self) -> Result<(), SessionError> {
        // Memory first: even if storage fails, this process is logged out.
        *self.state.write() = SessionState::Anonymous;
        self.store.clear().await?;
        Ok(())
    }

    /// Resolves the startup session against the auth service.
    ///
    /// - No persisted token → resolves to anonymous (stray keys cleared).
    /// - Persisted token, server confirms → the server's principal replaces
    ///   any cached copy and is re-persisted.
    /// - Any failure (storage read, auth call, undecodable principal) →
    ///   token, principal, and tenant are all cleared. Stale data is never
    ///   kept.
    ///
    /// Call once at startup, before rendering anything
    /// authorization-dependent; not re-entrant.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] only for failures of the local
    /// storage while clearing or re-persisting. A rejected or unreachable
    /// auth service is not an error: it resolves the session to anonymous.
    pub async fn verify(&self) -> Result<SessionState, SessionError> {
        let persisted = match self.store.load().await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable, clearing");
                self.invalidate().await?;
                return Ok(SessionState::Anonymous);
            }
        };

        let Some(token) = persisted.token else {
            tracing::debug!("no persisted token, resolving anonymous");
            self.invalidate().await?;
            return Ok(SessionState::Anonymous);
        };

        let record = match self.auth.current_principal(&token).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "session verify rejected, clearing");
                self.invalidate().await?;
                return Ok(SessionState::Anonymous);
            }
        };

        let principal = match Principal::try_from(record) {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(error = %e, "verify returned undecodable principal, clearing");
                self.invalidate().await?;
                return Ok(SessionState::Anonymous);
            }
        };

        self.check_grants(&principal);
        let session = AuthSession::new(principal, persisted.tenant, token);
        self.store.save(&session).await?;
        tracing::info!(principal = %session.principal(), "session verified");

        let state = SessionState::Authenticated(session);
        *self.state.write() = state.clone();
        Ok(state)
    }

    /// Warns about custom grants the registry does not know.
    fn check_grants(&self, principal: &Principal) {
        if let Role::Custom(set) = principal.role() {
            if let Err(e) = self.registry.validate_set(set) {
                tracing::warn!(principal = %principal, error = %e, "unknown capability in grants");
            }
        }
    }
}
