//! Role classification.
//!
//! [`Role`] is a closed enum, so every consumer is forced to handle all
//! three classifications exhaustively and a silently-added fourth role
//! cannot fall through an `if/else` chain unchecked. The permission data of
//! a custom role travels inside the variant: a `Custom` role without its
//! [`PermissionSet`] is unrepresentable.

use crate::PermissionSet;
use serde::{Deserialize, Serialize};

/// Coarse-grained classification of a principal.
///
/// | Role | Capability rule |
/// |------|-----------------|
/// | `Admin` | every capability, unconditionally |
/// | `Operator` | every capability except `"users"` (hard-coded carve-out) |
/// | `Custom` | exactly the strict-true entries of its [`PermissionSet`] |
///
/// The operator carve-out is intentionally *not* data-driven while the
/// custom role is fully data-driven. The asymmetry is preserved from the
/// backend contract; unifying the two would silently change behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user administration.
    Admin,
    /// Day-to-day access to everything except user administration.
    Operator,
    /// Access driven entirely by the embedded permission set.
    Custom(PermissionSet),
}

impl Role {
    /// Returns the classification without the custom payload.
    #[must_use]
    pub fn kind(&self) -> RoleKind {
        match self {
            Self::Admin => RoleKind::Admin,
            Self::Operator => RoleKind::Operator,
            Self::Custom(_) => RoleKind::Custom,
        }
    }

    /// Returns `true` for the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Role classification without payload, for strict role comparisons.
///
/// # Example
///
/// ```
/// use sitegate_types::{PermissionSet, Role, RoleKind};
///
/// assert_eq!(Role::Admin.kind(), RoleKind::Admin);
/// assert_eq!(Role::Custom(PermissionSet::new()).kind(), RoleKind::Custom);
/// assert_eq!(RoleKind::Operator.name(), "operator");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    /// See [`Role::Admin`].
    Admin,
    /// See [`Role::Operator`].
    Operator,
    /// See [`Role::Custom`].
    Custom,
}

impl RoleKind {
    /// Returns the wire name of the classification.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
