//! Pure authorization decisions for sitegate.
//!
//! Two questions are answered here, deliberately kept apart:
//!
//! ```text
//! "May this principal touch this feature area at all?"   → permission model
//! "Does an authorized attempt execute or get proposed?"  → action router
//! ```
//!
//! | Decision | Function | Result |
//! |----------|----------|--------|
//! | Capability gate | [`has_capability`] | `bool` |
//! | Role check | [`has_role`] | `bool` |
//! | Carry-out mode | [`route_action`] | [`ActionRoute`] |
//!
//! Both are pure and infallible: no I/O, no caching concerns, safe to call
//! on every render. The fallible parts of a mutation (the actual service
//! calls) live in `sitegate-client`.
//!
//! # Crate Architecture
//!
//! ```text
//! sitegate-types   (Principal, Role, Capability)
//!      ↑
//! sitegate-auth    (has_capability, route_action, ChangeRequest)  ◄── THIS CRATE
//!      ↑
//! sitegate-client  (ActionDispatcher: drives routes through services)
//! ```
//!
//! # Design Principles
//!
//! - **Deny wins**: an absent principal, an empty permission set, and an
//!   unknown capability all fail closed.
//! - **Admin override is absolute**: no capability can be withheld from an
//!   admin, and every admin mutation executes directly.
//! - **Non-admins propose**: every non-admin mutation becomes a
//!   [`ChangeRequestEnvelope`] for an admin to approve later; the entity
//!   list is never optimistically mutated.

pub mod permission;
pub mod request;
pub mod route;

pub use permission::{has_capability, has_role};
pub use request::{ChangeRequest, ChangeRequestEnvelope, RequestStatus, RequestType};
pub use route::{route_action, ActionRoute};
