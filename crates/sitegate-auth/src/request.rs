//! Change-request contract types.
//!
//! The change-request queue itself is backend-owned. This module defines
//! only what this side produces ([`ChangeRequestEnvelope`]) and consumes
//! for display ([`ChangeRequest`], [`RequestStatus`]). Status transitions
//! (pending → approved/rejected) happen server-side when an admin decides;
//! this code never transitions a status locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag identifying the deferred action, e.g. `create_purchase` or
/// `edit_supplier`.
///
/// The tag is chosen by the calling screen per entity type and is opaque to
/// the router and the queue alike.
///
/// # Example
///
/// ```
/// use sitegate_auth::RequestType;
///
/// assert_eq!(RequestType::create("purchase").as_str(), "create_purchase");
/// assert_eq!(RequestType::edit("supplier").as_str(), "edit_supplier");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestType(String);

impl RequestType {
    /// Tag for creating a new entity: `create_<entity>`.
    #[must_use]
    pub fn create(entity: &str) -> Self {
        Self(format!("create_{entity}"))
    }

    /// Tag for editing an existing entity: `edit_<entity>`.
    #[must_use]
    pub fn edit(entity: &str) -> Self {
        Self(format!("edit_{entity}"))
    }

    /// Wraps an already-formed tag.
    #[must_use]
    pub fn from_tag(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a non-admin submits to the queue instead of calling the direct
/// write endpoint.
///
/// `request_data` is byte-for-byte the payload the direct path would have
/// sent, so an approving admin replays it unchanged. `entity_id` is `None`
/// for creations and serializes as an explicit `null` (the queue contract
/// distinguishes "create" from "edit" by it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestEnvelope {
    /// Action tag.
    pub request_type: RequestType,
    /// The payload the action would apply.
    pub request_data: Value,
    /// Target entity for edits; `None` (wire `null`) for creations.
    pub entity_id: Option<String>,
}

impl ChangeRequestEnvelope {
    /// Builds an envelope.
    #[must_use]
    pub fn new(request_type: RequestType, request_data: Value, entity_id: Option<String>) -> Self {
        Self {
            request_type,
            request_data,
            entity_id,
        }
    }

    /// Returns `true` if this proposes a creation (no target entity).
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.entity_id.is_none()
    }
}

/// Lifecycle of a queued request, owned and transitioned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved and applied server-side.
    Approved,
    /// Rejected; the proposed mutation was never applied.
    Rejected,
}

impl RequestStatus {
    /// Returns `true` while the request awaits a decision.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` once a decision has been made either way.
    #[must_use]
    pub fn is_decided(self) -> bool {
        !self.is_pending()
    }

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued request as the backend returns it, for the pending-requests
/// screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    /// Backend identifier of the request.
    pub id: String,
    /// Action tag.
    pub request_type: RequestType,
    /// The proposed payload.
    pub request_data: Value,
    /// Target entity for edits.
    pub entity_id: Option<String>,
    /// Current decision state.
    pub status: RequestStatus,
    /// Who proposed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    /// When it was queued.
    pub created_at: DateTime<Utc>,
}
