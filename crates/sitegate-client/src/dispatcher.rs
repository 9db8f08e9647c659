//! The action dispatcher.
//!
//! Every mutating screen funnels its submit handler through
//! [`ActionDispatcher`], which composes the pieces in order:
//!
//! 1. capability gate (`has_capability`): denial never touches the network;
//! 2. routing (`route_action`): execute directly or wrap into an envelope;
//! 3. the service call: entity endpoint or change-request queue;
//! 4. the 401 boundary: any `AuthenticationRejected` invalidates the
//!    session before the error propagates to the screen.
//!
//! The dispatcher never mutates entity state locally: an `Executed` outcome
//! means the caller refetches its list, a `Queued` outcome means the caller
//! shows a "request queued" confirmation and nothing else.

use crate::attempt::{MutationAttempt, RouteMode};
use crate::services::{ChangeRequestApi, EntityApi};
use serde_json::Value;
use sitegate_auth::{has_capability, route_action, ActionRoute, ChangeRequest, RequestType};
use sitegate_session::{AuthApi, SessionManager, SessionStore};
use sitegate_types::{ApiError, Capability, Principal};
use std::future::Future;
use std::sync::Arc;

/// Boundary hook invoked when any collaborator answers 401.
///
/// Implemented by [`SessionManager`] (clears token, principal, and tenant)
/// and by test doubles.
pub trait UnauthorizedHandler: Send + Sync {
    /// Invalidates the current session.
    fn on_unauthorized(&self) -> impl Future<Output = ()> + Send;
}

impl<S: SessionStore, A: AuthApi> UnauthorizedHandler for SessionManager<S, A> {
    async fn on_unauthorized(&self) {
        if let Err(e) = self.invalidate().await {
            tracing::warn!(error = %e, "failed to clear session after 401");
        }
    }
}

impl<T: UnauthorizedHandler> UnauthorizedHandler for Arc<T> {
    async fn on_unauthorized(&self) {
        T::on_unauthorized(self).await;
    }
}

/// What the caller should tell the user after a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The mutation was applied directly; refetch the entity list.
    Executed {
        /// The record the write endpoint returned.
        data: Value,
    },
    /// The mutation was queued for admin approval; show a confirmation
    /// only, do not touch the entity list.
    Queued {
        /// The pending request as the queue recorded it.
        request: ChangeRequest,
    },
}

impl ActionOutcome {
    /// Returns `true` if the mutation was applied directly.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }

    /// Returns `true` if the mutation awaits admin approval.
    #[must_use]
    pub fn is_queued(&self) -> bool {
        matches!(self, Self::Queued { .. })
    }
}

/// The single decision point for mutating calls of one entity type.
///
/// Holds the entity's direct endpoints, the shared change-request queue,
/// and the session boundary. Screens construct one per entity type and
/// reuse it for every submit.
pub struct ActionDispatcher<H> {
    entities: Arc<dyn EntityApi>,
    requests: Arc<dyn ChangeRequestApi>,
    sessions: H,
}

impl<H: UnauthorizedHandler> ActionDispatcher<H> {
    /// Wires a dispatcher.
    pub fn new(
        entities: Arc<dyn EntityApi>,
        requests: Arc<dyn ChangeRequestApi>,
        sessions: H,
    ) -> Self {
        Self {
            entities,
            requests,
            sessions,
        }
    }

    /// Carries out one create/edit attempt.
    ///
    /// `entity_id` is `None` for creations. `request_type` follows the
    /// `create_<entity>` / `edit_<entity>` convention and must match
    /// `entity_id`'s presence.
    ///
    /// # Errors
    ///
    /// - [`ApiError::PermissionDenied`] if the principal lacks the
    ///   capability, decided locally with no network call made.
    /// - Any collaborator error, after the 401 boundary has run.
    pub async fn submit_mutation(
        &self,
        principal: Option<&Principal>,
        capability: &Capability,
        request_type: RequestType,
        payload: Value,
        entity_id: Option<String>,
    ) -> Result<ActionOutcome, ApiError> {
        let mut attempt = MutationAttempt::new();

        let Some(principal) = principal.filter(|&p| has_capability(Some(p), capability)) else {
            attempt.mark_denied(capability);
            return Err(ApiError::permission_denied(capability.clone()));
        };

        let route = route_action(principal, request_type, payload, entity_id);
        attempt.mark_routed(RouteMode::from(&route));
        attempt.mark_submitted();

        let outcome = match route {
            ActionRoute::Execute { payload, entity_id } => {
                let result = match entity_id.as_deref() {
                    Some(id) => self.entities.update(id, &payload).await,
                    None => self.entities.create(&payload).await,
                };
                self.guard(result)
                    .await
                    .map(|data| ActionOutcome::Executed { data })
            }
            ActionRoute::Request(ref envelope) => self
                .guard(self.requests.submit(envelope).await)
                .await
                .map(|request| ActionOutcome::Queued { request }),
        };

        match &outcome {
            Ok(o) => {
                attempt.mark_succeeded();
                tracing::info!(
                    principal = %principal,
                    capability = %capability,
                    queued = o.is_queued(),
                    "mutation settled"
                );
            }
            Err(e) => attempt.mark_failed(e),
        }
        outcome
    }

    /// Deletes an entity directly. Admin-only: deletion has no
    /// change-request form, so non-admins are denied locally.
    ///
    /// # Errors
    ///
    /// - [`ApiError::PermissionDenied`] for non-admins or missing
    ///   capability.
    /// - Any collaborator error, after the 401 boundary has run.
    pub async fn delete_entity(
        &self,
        principal: Option<&Principal>,
        capability: &Capability,
        entity_id: &str,
    ) -> Result<(), ApiError> {
        let allowed = principal.is_some_and(|p| {
            p.role().is_admin() && has_capability(Some(p), capability)
        });
        if !allowed {
            return Err(ApiError::permission_denied(capability.clone()));
        }
        self.guard(self.entities.delete(entity_id).await).await
    }

    async fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if matches!(result, Err(ApiError::AuthenticationRejected)) {
            tracing::warn!("collaborator answered 401, invalidating session");
            self.sessions.on_unauthorized().await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use serde_json::json;
    use sitegate_auth::{ChangeRequestEnvelope, RequestStatus};
    use sitegate_types::{PermissionSet, Role, UserId};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct FakeEntities {
        created: Mutex<Vec<Value>>,
        updated: Mutex<Vec<(String, Value)>>,
        deleted: Mutex<Vec<String>>,
        fail_with: Mutex<Option<ApiError>>,
    }

    #[async_trait::async_trait]
    impl EntityApi for FakeEntities {
        async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
            if let Some(e) = self.fail_with.lock().take() {
                return Err(e);
            }
            self.created.lock().push(payload.clone());
            Ok(json!({"id": "e-1", "echo": payload}))
        }

        async fn update(&self, entity_id: &str, payload: &Value) -> Result<Value, ApiError> {
            if let Some(e) = self.fail_with.lock().take() {
                return Err(e);
            }
            self.updated
                .lock()
                .push((entity_id.to_string(), payload.clone()));
            Ok(json!({"id": entity_id, "echo": payload}))
        }

        async fn delete(&self, entity_id: &str) -> Result<(), ApiError> {
            if let Some(e) = self.fail_with.lock().take() {
                return Err(e);
            }
            self.deleted.lock().push(entity_id.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeQueue {
        submitted: Mutex<Vec<ChangeRequestEnvelope>>,
        fail_with: Mutex<Option<ApiError>>,
    }

    #[async_trait::async_trait]
    impl ChangeRequestApi for FakeQueue {
        async fn submit(
            &self,
            envelope: &ChangeRequestEnvelope,
        ) -> Result<ChangeRequest, ApiError> {
            if let Some(e) = self.fail_with.lock().take() {
                return Err(e);
            }
            self.submitted.lock().push(envelope.clone());
            Ok(ChangeRequest {
                id: "cr-1".to_string(),
                request_type: envelope.request_type.clone(),
                request_data: envelope.request_data.clone(),
                entity_id: envelope.entity_id.clone(),
                status: RequestStatus::Pending,
                requested_by: None,
                created_at: Utc::now(),
            })
        }
    }

    #[derive(Default)]
    struct FakeBoundary {
        invalidated: AtomicBool,
    }

    impl UnauthorizedHandler for FakeBoundary {
        async fn on_unauthorized(&self) {
            self.invalidated.store(true, Ordering::SeqCst);
        }
    }

    struct Harness {
        entities: Arc<FakeEntities>,
        queue: Arc<FakeQueue>,
        dispatcher: ActionDispatcher<Arc<FakeBoundary>>,
        boundary: Arc<FakeBoundary>,
    }

    fn harness() -> Harness {
        let entities = Arc::new(FakeEntities::default());
        let queue = Arc::new(FakeQueue::default());
        let boundary = Arc::new(FakeBoundary::default());
        let dispatcher = ActionDispatcher::new(
            entities.clone() as Arc<dyn EntityApi>,
            queue.clone() as Arc<dyn ChangeRequestApi>,
            boundary.clone(),
        );
        Harness {
            entities,
            queue,
            dispatcher,
            boundary,
        }
    }

    fn admin() -> Principal {
        Principal::new(UserId::new("u-1"), "Admin", "admin@example.com", Role::Admin)
    }

    fn operator() -> Principal {
        Principal::new(UserId::new("u-2"), "Op", "op@example.com", Role::Operator)
    }

    fn cap(name: &str) -> Capability {
        Capability::new(name).expect("capability name")
    }

    #[tokio::test]
    async fn admin_create_hits_entity_endpoint() {
        let h = harness();
        let outcome = h
            .dispatcher
            .submit_mutation(
                Some(&admin()),
                &cap("purchases"),
                RequestType::create("purchase"),
                json!({"amount": 1200}),
                None,
            )
            .await
            .expect("admin create");

        assert!(outcome.is_executed());
        assert_eq!(h.entities.created.lock().len(), 1);
        assert!(h.queue.submitted.lock().is_empty());
    }

    #[tokio::test]
    async fn admin_edit_hits_update_endpoint() {
        let h = harness();
        let outcome = h
            .dispatcher
            .submit_mutation(
                Some(&admin()),
                &cap("suppliers"),
                RequestType::edit("supplier"),
                json!({"name": "Acme"}),
                Some("s-9".to_string()),
            )
            .await
            .expect("admin edit");

        assert!(outcome.is_executed());
        let updated = h.entities.updated.lock();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "s-9");
    }

    #[tokio::test]
    async fn operator_mutation_is_queued_not_executed() {
        let h = harness();
        let outcome = h
            .dispatcher
            .submit_mutation(
                Some(&operator()),
                &cap("purchases"),
                RequestType::create("purchase"),
                json!({"amount": 500}),
                None,
            )
            .await
            .expect("operator submit");

        match outcome {
            ActionOutcome::Queued { request } => {
                assert_eq!(request.request_type.as_str(), "create_purchase");
                assert!(request.status.is_pending());
            }
            ActionOutcome::Executed { .. } => panic!("operator must not execute directly"),
        }
        assert!(h.entities.created.lock().is_empty());
        assert!(h.entities.updated.lock().is_empty());
    }

    #[tokio::test]
    async fn denied_attempt_makes_no_calls() {
        let h = harness();
        let err = h
            .dispatcher
            .submit_mutation(
                Some(&operator()),
                &cap("users"),
                RequestType::create("user"),
                json!({"name": "Eve"}),
                None,
            )
            .await
            .expect_err("operator cannot administer users");

        assert!(matches!(err, ApiError::PermissionDenied { .. }));
        assert!(h.entities.created.lock().is_empty());
        assert!(h.queue.submitted.lock().is_empty());
    }

    #[tokio::test]
    async fn missing_principal_is_denied() {
        let h = harness();
        let err = h
            .dispatcher
            .submit_mutation(
                None,
                &cap("items"),
                RequestType::create("item"),
                json!({}),
                None,
            )
            .await
            .expect_err("no principal");
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn custom_role_without_grant_is_denied() {
        let h = harness();
        let principal = Principal::new(
            UserId::new("u-3"),
            "Custom",
            "custom@example.com",
            Role::Custom(PermissionSet::new()),
        );
        let err = h
            .dispatcher
            .submit_mutation(
                Some(&principal),
                &cap("items"),
                RequestType::create("item"),
                json!({}),
                None,
            )
            .await
            .expect_err("no grant");
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn unauthorized_from_entity_endpoint_invalidates_session() {
        let h = harness();
        *h.entities.fail_with.lock() = Some(ApiError::AuthenticationRejected);

        let err = h
            .dispatcher
            .submit_mutation(
                Some(&admin()),
                &cap("items"),
                RequestType::create("item"),
                json!({}),
                None,
            )
            .await
            .expect_err("401");

        assert_eq!(err, ApiError::AuthenticationRejected);
        assert!(h.boundary.invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unauthorized_from_queue_invalidates_session() {
        let h = harness();
        *h.queue.fail_with.lock() = Some(ApiError::AuthenticationRejected);

        let err = h
            .dispatcher
            .submit_mutation(
                Some(&operator()),
                &cap("items"),
                RequestType::create("item"),
                json!({}),
                None,
            )
            .await
            .expect_err("401");

        assert_eq!(err, ApiError::AuthenticationRejected);
        assert!(h.boundary.invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn other_errors_do_not_invalidate_session() {
        let h = harness();
        *h.queue.fail_with.lock() = Some(ApiError::validation("amount required"));

        let err = h
            .dispatcher
            .submit_mutation(
                Some(&operator()),
                &cap("purchases"),
                RequestType::create("purchase"),
                json!({}),
                None,
            )
            .await
            .expect_err("validation failure");

        assert!(matches!(err, ApiError::ValidationFailed { .. }));
        assert!(!h.boundary.invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn delete_is_admin_only() {
        let h = harness();
        let err = h
            .dispatcher
            .delete_entity(Some(&operator()), &cap("items"), "i-1")
            .await
            .expect_err("operator cannot delete");
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
        assert!(h.entities.deleted.lock().is_empty());

        h.dispatcher
            .delete_entity(Some(&admin()), &cap("items"), "i-1")
            .await
            .expect("admin delete");
        assert_eq!(h.entities.deleted.lock().as_slice(), ["i-1".to_string()]);
    }
}
