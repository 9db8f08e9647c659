//! Identifier types for sitegate.
//!
//! Identifiers are opaque strings as issued by the backend. The backend owns
//! identity allocation; this side never derives meaning from the contents.
//! [`UserId::random`] and [`TenantId::random`] exist for tests and local
//! fixtures and produce UUID v4 strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a user, as issued by the backend.
///
/// # Example
///
/// ```
/// use sitegate_types::UserId;
///
/// let id = UserId::new("64af3c2e9b1d");
/// assert_eq!(id.as_str(), "64af3c2e9b1d");
///
/// let a = UserId::random();
/// let b = UserId::random();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a backend-issued identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier (UUID v4). Intended for tests.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a tenant (company account), as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wraps a backend-issued identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier (UUID v4). Intended for tests.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
