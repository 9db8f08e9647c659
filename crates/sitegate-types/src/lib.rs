//! Identity and wire vocabulary for sitegate.
//!
//! This crate is the bottom layer of the sitegate workspace. It defines
//! the types every other crate speaks in, with no decision logic:
//!
//! | Concern | Types |
//! |---------|-------|
//! | Identity | [`UserId`], [`TenantId`], [`Principal`], [`Tenant`] |
//! | Access vocabulary | [`Capability`], [`PermissionSet`], [`Role`], [`RoleKind`] |
//! | Capability registry | [`CapabilityRegistry`] |
//! | Wire contracts | [`PrincipalRecord`], [`ApiEnvelope`], [`ApiError`] |
//! | Error convention | [`ErrorCode`] |
//!
//! # Crate Architecture
//!
//! ```text
//! sitegate-types   (identity, vocabulary, wire contracts)  ◄── THIS CRATE
//!      ↑
//! sitegate-auth    (permission model, action router)
//!      ↑
//! sitegate-session (session store, verify lifecycle)
//!      ↑
//! sitegate-client  (service traits, action dispatcher)
//! ```
//!
//! # Design Principles
//!
//! - **Identity is not permission**: [`Principal`] carries who the actor
//!   is; deciding what they may do lives in `sitegate-auth`.
//! - **Closed roles**: [`Role`] is a closed enum. Unknown role strings are
//!   rejected at the wire boundary ([`PrincipalRecord`]) so the permission
//!   model never sees an unclassifiable actor.
//! - **Strict-true permissions**: [`PermissionSet`] records a capability as
//!   granted only when the wire value is the boolean `true`; every other
//!   value fails closed.

pub mod capability;
pub mod envelope;
pub mod error;
pub mod id;
pub mod principal;
pub mod registry;
pub mod role;
pub mod wire;

pub use capability::{Capability, CapabilityError, PermissionSet};
pub use envelope::{ApiEnvelope, ApiError};
pub use error::ErrorCode;
pub use id::{TenantId, UserId};
pub use principal::{Principal, Tenant};
pub use registry::CapabilityRegistry;
pub use role::{Role, RoleKind};
pub use wire::{PrincipalRecord, WireError};
