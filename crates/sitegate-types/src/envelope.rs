//! Collaborator response envelope and error taxonomy.
//!
//! Every backend service answers with the same envelope:
//!
//! ```json
//! {"success": true, "data": {...}}
//! {"success": false, "message": "supplier name already exists"}
//! ```
//!
//! [`ApiEnvelope`] models that contract; [`ApiError`] is the taxonomy every
//! collaborator failure collapses into. Transports map HTTP status codes to
//! these variants behind the service traits in `sitegate-client`; nothing
//! above the trait boundary sees status codes.

use crate::{Capability, ErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy for collaborator calls and local gating.
///
/// | Variant | Origin | Recoverable |
/// |---------|--------|-------------|
/// | `AuthenticationRejected` | any 401 | no, session is invalidated |
/// | `ValidationFailed` | non-2xx with a message, or `success: false` | no |
/// | `NetworkUnavailable` | transport failure, no response | yes |
/// | `RequestTimedOut` | transport timeout | yes |
/// | `PermissionDenied` | local permission model, no network call made | no |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The collaborator rejected the bearer token.
    #[error("authentication rejected")]
    AuthenticationRejected,

    /// The collaborator refused the request; `message` is shown verbatim.
    #[error("{message}")]
    ValidationFailed {
        /// Server-provided reason, surfaced to the user unchanged.
        message: String,
    },

    /// No response arrived (connection refused, DNS, offline).
    #[error("network unavailable")]
    NetworkUnavailable,

    /// The transport gave up waiting for a response.
    #[error("request timed out")]
    RequestTimedOut,

    /// The local permission model denied the capability before any network
    /// call was attempted.
    #[error("permission denied for capability '{capability}'")]
    PermissionDenied {
        /// The capability the principal lacks.
        capability: Capability,
    },
}

impl ApiError {
    /// Creates a `ValidationFailed` with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Creates a `PermissionDenied` for the given capability.
    #[must_use]
    pub fn permission_denied(capability: Capability) -> Self {
        Self::PermissionDenied { capability }
    }
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRejected => "API_AUTH_REJECTED",
            Self::ValidationFailed { .. } => "API_VALIDATION_FAILED",
            Self::NetworkUnavailable => "API_NETWORK_UNAVAILABLE",
            Self::RequestTimedOut => "API_REQUEST_TIMED_OUT",
            Self::PermissionDenied { .. } => "API_PERMISSION_DENIED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable | Self::RequestTimedOut)
    }
}

/// The `{success, data, message}` envelope wrapping every service response.
///
/// # Example
///
/// ```
/// use sitegate_types::ApiEnvelope;
///
/// let ok: ApiEnvelope<u32> =
///     serde_json::from_str(r#"{"success": true, "data": 7}"#).expect("json");
/// assert_eq!(ok.into_result().expect("success"), 7);
///
/// let failed: ApiEnvelope<u32> =
///     serde_json::from_str(r#"{"success": false, "message": "nope"}"#).expect("json");
/// assert!(failed.into_result().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded server-side.
    pub success: bool,
    /// Payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable reason, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Wraps a failure message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwraps the envelope into a payload or an [`ApiError`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] when `success` is false
    /// (carrying the server message verbatim) or when a successful envelope
    /// is missing its payload.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ApiError::validation(message));
        }
        self.data
            .ok_or_else(|| ApiError::validation("response missing data"))
    }
}
