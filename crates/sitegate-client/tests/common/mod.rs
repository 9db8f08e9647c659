//! Shared fakes for the dispatcher flow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{json, Value};
use sitegate_auth::{ChangeRequest, ChangeRequestEnvelope, RequestStatus};
use sitegate_client::{ChangeRequestApi, EntityApi};
use sitegate_session::{
    AuthApi, AuthSession, BearerToken, LoginResponse, MemoryStore, PersistedSession, SessionStore,
    StorageError,
};
use sitegate_types::{ApiError, Capability, PermissionSet, Principal, PrincipalRecord, Role, UserId};
use std::sync::Arc;

/// Entity endpoint fake recording every call; fails once with the scripted
/// error if one is set.
#[derive(Default)]
pub struct RecordingEntities {
    pub created: Mutex<Vec<Value>>,
    pub updated: Mutex<Vec<(String, Value)>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ApiError>>,
}

impl RecordingEntities {
    pub fn call_count(&self) -> usize {
        self.created.lock().len() + self.updated.lock().len() + self.deleted.lock().len()
    }
}

#[async_trait]
impl EntityApi for RecordingEntities {
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

/// Change-request queue fake echoing submissions back as pending requests.
#[derive(Default)]
pub struct RecordingQueue {
    pub submitted: Mutex<Vec<ChangeRequestEnvelope>>,
    pub fail_with: Mutex<Option<ApiError>>,
}

#[async_trait]
impl ChangeRequestApi for RecordingQueue {
    async fn submit(&self, envelope: &ChangeRequestEnvelope) -> Result<ChangeRequest, ApiError> {
        if let Some(e) = self.fail_with.lock().take() {
            return Err(e);
        }
        self.submitted.lock().push(envelope.clone());
        Ok(ChangeRequest {
            id: format!("cr-{}", self.submitted.lock().len()),
            request_type: envelope.request_type.clone(),
            request_data: envelope.request_data.clone(),
            entity_id: envelope.entity_id.clone(),
            status: RequestStatus::Pending,
            requested_by: None,
            created_at: Utc::now(),
        })
    }
}

/// Store wrapper so a test can keep a handle on the storage a
/// `SessionManager` owns.
#[derive(Default, Clone)]
pub struct SharedStore(pub Arc<MemoryStore>);

impl SharedStore {
    pub async fn load_snapshot(&self) -> PersistedSession {
        self.0.load().await.expect("memory store load")
    }
}

impl SessionStore for SharedStore {
    async fn save(&self, session: &AuthSession) -> Result<(), StorageError> {
        self.0.save(session).await
    }

    async fn load(&self) -> Result<PersistedSession, StorageError> {
        self.0.load().await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.0.clear().await
    }
}

/// Auth service that must not be reached during dispatch flows.
pub struct UnreachableAuth;

impl AuthApi for UnreachableAuth {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        panic!("dispatch flows must not call the auth service");
    }

    async fn current_principal(&self, _token: &BearerToken) -> Result<PrincipalRecord, ApiError> {
        panic!("dispatch flows must not call the auth service");
    }
}

pub fn admin() -> Principal {
    Principal::new(UserId::new("u-1"), "Ada", "ada@example.com", Role::Admin)
}

pub fn operator() -> Principal {
    Principal::new(UserId::new("u-2"), "Omar", "omar@example.com", Role::Operator)
}

pub fn custom_with(granted: &[&str]) -> Principal {
    let set: PermissionSet = granted.iter().map(|name| cap(name)).collect();
    Principal::new(
        UserId::new("u-3"),
        "Cleo",
        "cleo@example.com",
        Role::Custom(set),
    )
}

pub fn cap(name: &str) -> Capability {
    Capability::new(name).expect("capability name")
}

pub fn admin_session() -> AuthSession {
    AuthSession::new(admin(), None, BearerToken::new("tok-1"))
}
