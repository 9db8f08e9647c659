//! Session lifecycle and persistence for sitegate.
//!
//! This crate owns the single current principal/tenant/token triple and its
//! survival across process restarts.
//!
//! # Lifecycle
//!
//! ```text
//!            ┌────────────┐  verify(): no token, or any failure
//! start ───► │ Unresolved │ ───────────────────────────────► Anonymous
//!            └────────────┘
//!                  │ verify(): token valid, server principal fetched
//!                  ▼
//!           Authenticated ◄──── login()
//!                  │
//!                  └── logout() / invalidate() ──► Anonymous
//! ```
//!
//! Until `verify` settles, the session is [`SessionState::Unresolved`] and
//! no authorization decision is authoritative; consumers gate on
//! [`SessionManager::is_loading`].
//!
//! # Invariant
//!
//! Principal and token are present together or absent together. This is not
//! checked at runtime; it is unrepresentable: [`AuthSession`] holds both,
//! and the state enum holds at most one `AuthSession`.
//!
//! # Storage
//!
//! The [`SessionStore`] trait abstracts persistence; [`LocalFileStore`]
//! keeps three durable keys (`user`, `tenant`, `token`) as JSON files with
//! atomic temp-then-rename writes, and [`MemoryStore`] backs tests and
//! embedding.

pub mod api;
pub mod error;
pub mod local;
pub mod manager;
pub mod memory;
pub mod state;
pub mod store;

pub use api::{AuthApi, LoginResponse};
pub use error::{SessionError, StorageError};
pub use local::LocalFileStore;
pub use manager::SessionManager;
pub use memory::MemoryStore;
pub use state::{AuthSession, BearerToken, SessionState};
pub use store::{PersistedSession, SessionStore};
