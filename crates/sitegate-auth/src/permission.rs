//! The permission model.
//!
//! A single pure function decides whether a principal may touch a feature
//! area:
//!
//! | Principal | `"users"` | any other capability |
//! |-----------|-----------|----------------------|
//! | absent | denied | denied |
//! | admin | allowed | allowed |
//! | operator | **denied** | allowed |
//! | custom | strict-true lookup | strict-true lookup |
//!
//! The operator row is a hard-coded carve-out: operators do everything
//! except administer users, and that rule is code, not data. The custom row
//! is fully data-driven. The asymmetry is part of the backend contract and
//! is preserved as-is.
//!
//! Decisions are logged for audit at `debug` on both outcomes; denial here
//! is an expected UI-disablement signal on every render, not an incident.

use sitegate_types::{Capability, Principal, Role, RoleKind};

/// Decides whether `principal` may use `capability`.
///
/// Pure and side-effect free; safe to call per render or per request.
/// An absent principal (not logged in, or session still loading) is denied
/// everything.
///
/// # Example
///
/// ```
/// use sitegate_auth::has_capability;
/// use sitegate_types::{Capability, Principal, Role, UserId};
///
/// let users = Capability::new("users").expect("name");
/// let reports = Capability::new("reports").expect("name");
///
/// let operator = Principal::new(
///     UserId::new("u-1"), "Op", "op@example.com", Role::Operator,
/// );
///
/// assert!(has_capability(Some(&operator), &reports));
/// assert!(!has_capability(Some(&operator), &users));
/// assert!(!has_capability(None, &reports));
/// ```
#[must_use]
pub fn has_capability(principal: Option<&Principal>, capability: &Capability) -> bool {
    let Some(principal) = principal else {
        tracing::debug!(capability = %capability, "capability denied: no principal");
        return false;
    };

    let allowed = match principal.role() {
        // Absolute override: nothing is withheld from an admin.
        Role::Admin => true,
        // Hard-coded carve-out, intentionally not data-driven.
        Role::Operator => !capability.is_user_administration(),
        Role::Custom(set) => set.is_granted(capability),
    };

    tracing::debug!(
        principal = %principal,
        capability = %capability,
        allowed,
        "capability decision"
    );

    allowed
}

/// Decides whether `principal` has exactly the given role classification.
///
/// Strict equality on the classification; an absent principal matches no
/// role.
///
/// # Example
///
/// ```
/// use sitegate_auth::has_role;
/// use sitegate_types::{Principal, Role, RoleKind, UserId};
///
/// let admin = Principal::new(
///     UserId::new("u-1"), "Ada", "ada@example.com", Role::Admin,
/// );
///
/// assert!(has_role(Some(&admin), RoleKind::Admin));
/// assert!(!has_role(Some(&admin), RoleKind::Operator));
/// assert!(!has_role(None, RoleKind::Admin));
/// ```
#[must_use]
pub fn has_role(principal: Option<&Principal>, kind: RoleKind) -> bool {
    principal.is_some_and(|p| p.role().kind() == kind)
}
