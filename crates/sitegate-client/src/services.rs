//! Backend service traits.
//!
//! Dyn-safe (`async_trait`) so screens can hold one `Arc<dyn EntityApi>`
//! per entity type without caring which transport sits behind it. Transport
//! implementations own the envelope handling and the HTTP-status mapping:
//! by the time a result crosses these traits, it is either a payload or an
//! [`ApiError`].

use async_trait::async_trait;
use serde_json::Value;
use sitegate_auth::{ChangeRequest, ChangeRequestEnvelope};
use sitegate_types::ApiError;

/// Direct write endpoints of one entity type (items, purchases, suppliers,
/// users, ...). Only admins reach these; everyone else goes through the
/// change-request queue.
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// Creates an entity; returns the created record.
    async fn create(&self, payload: &Value) -> Result<Value, ApiError>;

    /// Updates an existing entity; returns the updated record.
    async fn update(&self, entity_id: &str, payload: &Value) -> Result<Value, ApiError>;

    /// Deletes an entity.
    async fn delete(&self, entity_id: &str) -> Result<(), ApiError>;
}

/// The change-request queue (write side).
///
/// The queue's state machine (pending → approved/rejected) is backend-owned;
/// this side only submits envelopes and reads back the queued request for
/// confirmation display.
#[async_trait]
pub trait ChangeRequestApi: Send + Sync {
    /// Queues a proposed mutation; returns the pending request.
    async fn submit(&self, envelope: &ChangeRequestEnvelope) -> Result<ChangeRequest, ApiError>;
}
