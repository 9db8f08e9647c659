//! Principal (authenticated actor) and tenant descriptor.
//!
//! A [`Principal`] is identity plus classification; it carries no decision
//! logic. Permission checks live in `sitegate-auth`, which keeps the plugin
//! boundary clean: anything that only needs to know *who* acted depends on
//! this crate alone.
//!
//! Principals are created server-side and reach this process through login
//! or the startup verify call. They are never mutated locally; role and
//! permission changes only arrive by re-fetching the authoritative copy.

use crate::{Role, TenantId, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated actor.
///
/// # Example
///
/// ```
/// use sitegate_types::{Principal, Role, UserId};
///
/// let p = Principal::new(
///     UserId::new("u-1"),
///     "Dana Site",
///     "dana@example.com",
///     Role::Operator,
/// );
/// assert_eq!(p.name(), "Dana Site");
/// assert!(p.is_active());
/// assert_eq!(p.role().name(), "operator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    is_active: bool,
}

impl Principal {
    /// Creates an active principal.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            is_active: true,
        }
    }

    /// Returns the same principal with the given activation flag.
    ///
    /// Inactive principals are rejected at verify time by the auth service;
    /// the flag is carried here for display only.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns the backend identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role classification.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Returns `true` unless the account has been deactivated server-side.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.role.name())
    }
}

/// Descriptor of the tenant (company account) a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Backend identifier of the tenant.
    pub id: TenantId,
    /// Display name of the company.
    pub name: String,
}

impl Tenant {
    /// Creates a tenant descriptor.
    #[must_use]
    pub fn new(id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
