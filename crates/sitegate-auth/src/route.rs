//! The action router.
//!
//! Single decision point between "call the write endpoint now" and "queue a
//! change request for an admin". Every mutating screen goes through
//! [`route_action`] before touching a service.
//!
//! The router assumes its precondition: the caller has already passed the
//! capability gate ([`crate::has_capability`]). It does not re-check; the
//! two concerns are separate ("may you touch this area" vs. "how is an
//! authorized attempt carried out").

use crate::{ChangeRequestEnvelope, RequestType};
use serde_json::Value;
use sitegate_types::{Principal, Role};

/// How an authorized mutation attempt is carried out.
///
/// # Example
///
/// ```
/// use sitegate_auth::{route_action, ActionRoute, RequestType};
/// use sitegate_types::{Principal, Role, UserId};
/// use serde_json::json;
///
/// let operator = Principal::new(
///     UserId::new("u-1"), "Op", "op@example.com", Role::Operator,
/// );
///
/// let route = route_action(
///     &operator,
///     RequestType::create("purchase"),
///     json!({"amount": 1200}),
///     None,
/// );
/// assert!(route.is_request());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRoute {
    /// Call the direct create/update endpoint with the payload.
    Execute {
        /// The mutation payload, passed through untouched.
        payload: Value,
        /// `None` for creations, the target id for edits.
        entity_id: Option<String>,
    },
    /// Submit the envelope to the change-request queue instead. No local
    /// optimistic mutation; the user only gets a "request queued"
    /// confirmation.
    Request(ChangeRequestEnvelope),
}

impl ActionRoute {
    /// Returns `true` for the direct-execute route.
    #[must_use]
    pub fn is_execute(&self) -> bool {
        matches!(self, Self::Execute { .. })
    }

    /// Returns `true` for the request-approval route.
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Returns the route mode as a string (`"execute"` or `"request"`).
    #[must_use]
    pub fn mode_str(&self) -> &'static str {
        match self {
            Self::Execute { .. } => "execute",
            Self::Request(_) => "request",
        }
    }
}

/// Routes an authorized mutation attempt.
///
/// Pure and infallible: admins execute directly, every other role gets its
/// payload wrapped into a [`ChangeRequestEnvelope`] with `entity_id`
/// passed through (`None` for creations). `request_type` is opaque here;
/// the calling screen picks it per entity type.
#[must_use]
pub fn route_action(
    principal: &Principal,
    request_type: RequestType,
    payload: Value,
    entity_id: Option<String>,
) -> ActionRoute {
    let route = match principal.role() {
        Role::Admin => ActionRoute::Execute { payload, entity_id },
        Role::Operator | Role::Custom(_) => ActionRoute::Request(ChangeRequestEnvelope::new(
            request_type,
            payload,
            entity_id,
        )),
    };

    tracing::debug!(principal = %principal, mode = route.mode_str(), "action routed");
    route
}
