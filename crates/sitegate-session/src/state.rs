//! Session state types.

use serde::{Deserialize, Serialize};
use sitegate_types::{Principal, Tenant};

/// Opaque bearer token issued by the auth service.
///
/// Never inspected locally; only stored, attached to requests, and cleared.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token for transport use (`Authorization` header).
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// No Display, and Debug is redacted: tokens must not reach logs.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// A fully-populated session: principal, optional tenant, and token.
///
/// Holding principal and token in one struct is what enforces the session
/// invariant: a user-without-token (or the reverse) cannot be constructed.
///
/// # Example
///
/// ```
/// use sitegate_session::{AuthSession, BearerToken};
/// use sitegate_types::{Principal, Role, UserId};
///
/// let session = AuthSession::new(
///     Principal::new(UserId::new("u-1"), "Ada", "ada@example.com", Role::Admin),
///     None,
///     BearerToken::new("tok-123"),
/// );
/// assert_eq!(session.principal().name(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    principal: Principal,
    tenant: Option<Tenant>,
    token: BearerToken,
}

impl AuthSession {
    /// Creates a populated session.
    #[must_use]
    pub fn new(principal: Principal, tenant: Option<Tenant>, token: BearerToken) -> Self {
        Self {
            principal,
            tenant,
            token,
        }
    }

    /// Returns the authenticated principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the tenant descriptor, if the backend provided one.
    #[must_use]
    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Returns the same session with the principal replaced by a fresh
    /// server copy (used by verify).
    #[must_use]
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = principal;
        self
    }
}

/// Where the process currently stands in the session lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Startup: `verify` has not settled yet. Authorization decisions made
    /// now are not authoritative.
    #[default]
    Unresolved,
    /// Logged out (or verify found nothing valid).
    Anonymous,
    /// Logged in.
    Authenticated(AuthSession),
}

impl SessionState {
    /// Returns `true` before `verify` has settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Returns `true` when a principal is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the principal, if authenticated.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(session) => Some(session.principal()),
            Self::Unresolved | Self::Anonymous => None,
        }
    }

    /// Returns the token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            Self::Authenticated(session) => Some(session.token()),
            Self::Unresolved | Self::Anonymous => None,
        }
    }
}
