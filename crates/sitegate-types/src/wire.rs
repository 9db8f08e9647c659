//! Wire form of a principal.
//!
//! The backend sends users as flat JSON objects with a role *string* and a
//! sibling `customPermissions` map. [`PrincipalRecord`] mirrors that shape
//! exactly; converting it into a typed [`Principal`] is where unknown role
//! strings get rejected, so the closed [`Role`] enum never has to represent
//! "some role we have never heard of".
//!
//! The same record shape is used for the durable `user` storage key, which
//! keeps what is on disk byte-compatible with what the server sends.

use crate::{ErrorCode, PermissionSet, Principal, Role, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors converting wire records into typed values.
#[derive(Debug, Error)]
pub enum WireError {
    /// The role string is not one of `admin`, `operator`, `custom`.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl ErrorCode for WireError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "WIRE_UNKNOWN_ROLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A new server role needs a client update, not a retry.
        false
    }
}

/// A principal exactly as the backend serializes it.
///
/// `customPermissions` is present and meaningful only for `role: "custom"`;
/// for other roles the conversion ignores it entirely.
///
/// # Example
///
/// ```
/// use sitegate_types::{Principal, PrincipalRecord, RoleKind};
///
/// let record: PrincipalRecord = serde_json::from_str(r#"{
///     "id": "u-7",
///     "name": "Rae Vendor",
///     "email": "rae@example.com",
///     "role": "custom",
///     "customPermissions": {"reports": true, "users": false},
///     "isActive": true
/// }"#).expect("valid user json");
///
/// let principal = Principal::try_from(record).expect("known role");
/// assert_eq!(principal.role().kind(), RoleKind::Custom);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalRecord {
    /// Backend identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role string: `admin`, `operator`, or `custom`.
    pub role: String,
    /// Permission map, meaningful only when `role` is `custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_permissions: Option<PermissionSet>,
    /// Account activation flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<PrincipalRecord> for Principal {
    type Error = WireError;

    fn try_from(record: PrincipalRecord) -> Result<Self, Self::Error> {
        let role = match record.role.as_str() {
            "admin" => Role::Admin,
            "operator" => Role::Operator,
            "custom" => Role::Custom(record.custom_permissions.unwrap_or_default()),
            other => return Err(WireError::UnknownRole(other.to_string())),
        };
        Ok(
            Principal::new(record.id, record.name, record.email, role)
                .with_active(record.is_active),
        )
    }
}

impl From<&Principal> for PrincipalRecord {
    fn from(principal: &Principal) -> Self {
        let custom_permissions = match principal.role() {
            Role::Custom(set) => Some(set.clone()),
            Role::Admin | Role::Operator => None,
        };
        Self {
            id: principal.id().clone(),
            name: principal.name().to_string(),
            email: principal.email().to_string(),
            role: principal.role().name().to_string(),
            custom_permissions,
            is_active: principal.is_active(),
        }
    }
}
