//! End-to-end session lifecycle against the file-backed store, including a
//! simulated process restart.

use parking_lot::Mutex;
use sitegate_session::{
    AuthApi, AuthSession, BearerToken, LocalFileStore, LoginResponse, SessionManager,
    SessionStore,
};
use sitegate_types::{ApiError, Principal, PrincipalRecord, Tenant, TenantId, UserId};

/// Auth service double: answers `current_principal` from a script, records
/// nothing else.
struct ScriptedAuth {
    current: Mutex<Option<Result<PrincipalRecord, ApiError>>>,
}

impl ScriptedAuth {
    fn new(result: Result<PrincipalRecord, ApiError>) -> Self {
        Self {
            current: Mutex::new(Some(result)),
        }
    }

    fn unused() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl AuthApi for ScriptedAuth {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        Err(ApiError::validation("login not scripted"))
    }

    async fn current_principal(&self, _token: &BearerToken) -> Result<PrincipalRecord, ApiError> {
        self.current
            .lock()
            .take()
            .expect("current_principal not scripted")
    }
}

fn record(name: &str, role: &str) -> PrincipalRecord {
    PrincipalRecord {
        id: UserId::new("u-1"),
        name: name.into(),
        email: "ada@example.com".into(),
        role: role.into(),
        custom_permissions: None,
        is_active: true,
    }
}

fn operator_session(token: &str) -> AuthSession {
    let principal = Principal::try_from(record("Ada", "operator")).expect("known role");
    AuthSession::new(
        principal,
        Some(Tenant::new(TenantId::new("t-1"), "Acme Construction")),
        BearerToken::new(token),
    )
}

#[tokio::test]
async fn login_survives_restart_and_verify_refreshes_the_principal() {
    let dir = tempfile::tempdir().expect("temp dir");

    // First process: log in and exit.
    {
        let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
        let manager = SessionManager::new(store, ScriptedAuth::unused());
        manager.login(operator_session("tok-1")).await.expect("login");
        assert!(manager.is_authenticated());
    }

    // Second process: verify against the server, whose copy has a new role.
    let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
    let manager = SessionManager::new(store, ScriptedAuth::new(Ok(record("Ada", "admin"))));

    assert!(manager.is_loading());
    let state = manager.verify().await.expect("verify");
    assert!(state.is_authenticated());

    let principal = manager.principal().expect("principal");
    assert!(principal.role().is_admin(), "server copy must win");

    // The refreshed copy was re-persisted.
    let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
    let persisted = store.load().await.expect("load");
    assert_eq!(persisted.user.map(|u| u.role), Some("admin".to_string()));
}

#[tokio::test]
async fn rejected_verify_leaves_no_keys_behind() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
        let manager = SessionManager::new(store, ScriptedAuth::unused());
        manager.login(operator_session("tok-stale")).await.expect("login");
    }

    let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
    let manager =
        SessionManager::new(store, ScriptedAuth::new(Err(ApiError::AuthenticationRejected)));
    let state = manager.verify().await.expect("verify");
    assert!(!state.is_authenticated());

    // All three keys are gone.
    for key in ["user.json", "tenant.json", "token.json"] {
        assert!(!dir.path().join(key).exists(), "{key} should be cleared");
    }
}

#[tokio::test]
async fn login_then_immediate_logout_leaves_empty_storage() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
    let manager = SessionManager::new(store, ScriptedAuth::unused());

    manager.login(operator_session("tok-1")).await.expect("login");
    manager.logout().await.expect("logout");

    let store = LocalFileStore::new(dir.path().to_path_buf()).expect("store");
    assert!(store.load().await.expect("load").is_empty());
}
