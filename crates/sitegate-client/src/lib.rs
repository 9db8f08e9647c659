//! Collaborator contracts and the mutation flow for sitegate.
//!
//! This is the top layer of the workspace: where pure decisions
//! (`sitegate-auth`) meet fallible collaborators (backend services) and the
//! session boundary (`sitegate-session`).
//!
//! # A mutation attempt, end to end
//!
//! ```text
//! NotAttempted ──capability denied──────────────► Failed(permission)
//!      │ capability allowed
//!      ▼
//! Routed(Execute | Request)
//!      │ submit to entity endpoint / change-request queue
//!      ▼
//! Submitted ──success:true──► Succeeded
//!      └─────error or success:false──► Failed(reason)
//! ```
//!
//! Terminal states are final; retries are a fresh attempt triggered by a
//! human. While an attempt is `Submitted` the caller disables its trigger
//! ([`MutationAttempt::is_in_flight`]) so a second submission cannot race
//! the first.
//!
//! # Boundary rule
//!
//! Any collaborator answering 401 invalidates the session (token,
//! principal, and tenant) no matter which screen made the call. The
//! [`ActionDispatcher`] enforces this through [`UnauthorizedHandler`].
//!
//! # Failure policy
//!
//! Failed mutations leave prior state untouched (there is no optimistic
//! apply). Failed list reads fall back per fetch to an explicit default via
//! [`fetch_or_default`], so one dead endpoint never blanks a whole
//! dashboard.

pub mod attempt;
pub mod dispatcher;
pub mod fetch;
pub mod services;

pub use attempt::{AttemptState, MutationAttempt, RouteMode};
pub use dispatcher::{ActionDispatcher, ActionOutcome, UnauthorizedHandler};
pub use fetch::fetch_or_default;
pub use services::{ChangeRequestApi, EntityApi};
