//! Local file-based session storage.
//!
//! The three storage keys live as JSON files in one directory:
//!
//! ```text
//! ~/.sitegate/session/
//! ├── user.json    (PrincipalRecord, backend wire form)
//! ├── tenant.json  (Tenant)
//! └── token.json   (BearerToken)
//! ```
//!
//! Writes are atomic per key: write to a dot-prefixed temp file, then
//! rename over the final path.

use crate::error::StorageError;
use crate::state::{AuthSession, BearerToken};
use crate::store::{PersistedSession, SessionStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sitegate_types::{PrincipalRecord, Tenant};
use std::path::{Path, PathBuf};
use tokio::fs;

const USER_KEY: &str = "user";
const TENANT_KEY: &str = "tenant";
const TOKEN_KEY: &str = "token";

/// File-backed session store.
///
/// # Example
///
/// ```no_run
/// use sitegate_session::{LocalFileStore, SessionStore};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalFileStore::new(PathBuf::from("~/.sitegate/session"))?;
/// let persisted = store.load().await?;
/// println!("token persisted: {}", persisted.token().is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base_path: PathBuf,
}

impl LocalFileStore {
    /// Creates a store rooted at `base_path`, creating the directory if
    /// needed. A leading `~` expands to the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryCreation`] if the directory cannot
    /// be created.
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        let expanded = expand_tilde(&base_path);
        if !expanded.exists() {
            std::fs::create_dir_all(&expanded)
                .map_err(|e| StorageError::directory_creation(&expanded, e))?;
        }
        Ok(Self {
            base_path: expanded,
        })
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.json.tmp"))
    }

    async fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        let temp = self.temp_path(key);
        fs::write(&temp, &json).await?;
        fs::rename(&temp, self.key_path(key)).await?;
        Ok(())
    }

    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_key(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            // Idempotent clear: a missing key is already cleared.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for LocalFileStore {
    async fn save(&self, session: &AuthSession) -> Result<(), StorageError> {
        self.write_key(USER_KEY, &PrincipalRecord::from(session.principal()))
            .await?;
        // tenant.json holds `null` for tenant-less sessions so the three
        // keys always move together.
        self.write_key(TENANT_KEY, &session.tenant()).await?;
        self.write_key(TOKEN_KEY, session.token()).await?;
        Ok(())
    }

    async fn load(&self) -> Result<PersistedSession, StorageError> {
        let user = self.read_key::<PrincipalRecord>(USER_KEY).await?;
        let tenant = self
            .read_key::<Option<Tenant>>(TENANT_KEY)
            .await?
            .flatten();
        let token = self.read_key::<BearerToken>(TOKEN_KEY).await?;
        Ok(PersistedSession {
            user,
            tenant,
            token,
        })
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.remove_key(USER_KEY).await?;
        self.remove_key(TENANT_KEY).await?;
        self.remove_key(TOKEN_KEY).await?;
        Ok(())
    }
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegate_types::{Principal, Role, TenantId, UserId};

    fn session() -> AuthSession {
        AuthSession::new(
            Principal::new(UserId::new("u-1"), "Ada", "ada@example.com", Role::Operator),
            Some(Tenant::new(TenantId::new("t-1"), "Acme Construction")),
            BearerToken::new("tok-123"),
        )
    }

    fn store() -> (LocalFileStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = LocalFileStore::new(dir.path().to_path_buf()).expect("create store");
        (store, dir)
    }

    #[tokio::test]
    async fn save_then_load_roundtrips_all_keys() {
        let (store, _dir) = store();
        store.save(&session()).await.expect("save");

        let persisted = store.load().await.expect("load");
        assert_eq!(
            persisted.user.as_ref().map(|u| u.id.as_str()),
            Some("u-1")
        );
        assert_eq!(
            persisted.tenant.as_ref().map(|t| t.id.as_str()),
            Some("t-1")
        );
        assert_eq!(
            persisted.token.as_ref().map(BearerToken::expose),
            Some("tok-123")
        );
    }

    #[tokio::test]
    async fn empty_directory_loads_as_empty_session() {
        let (store, _dir) = store();
        let persisted = store.load().await.expect("load");
        assert!(persisted.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_every_key_and_is_idempotent() {
        let (store, _dir) = store();
        store.save(&session()).await.expect("save");

        store.clear().await.expect("first clear");
        assert!(store.load().await.expect("load").is_empty());

        // Clearing again must still succeed.
        store.clear().await.expect("second clear");
    }

    #[tokio::test]
    async fn tenantless_session_roundtrips() {
        let (store, _dir) = store();
        let s = AuthSession::new(
            Principal::new(UserId::new("u-2"), "Bo", "bo@example.com", Role::Admin),
            None,
            BearerToken::new("tok-9"),
        );
        store.save(&s).await.expect("save");

        let persisted = store.load().await.expect("load");
        assert!(persisted.tenant.is_none());
        assert!(persisted.token.is_some());
        // The tenant key file still exists (holding null), so a later
        // clear removes a consistent set.
        assert!(store.base_path().join("tenant.json").exists());
    }

    #[tokio::test]
    async fn corrupt_key_surfaces_as_serialization_error() {
        let (store, _dir) = store();
        tokio::fs::write(store.base_path().join("token.json"), "{not json")
            .await
            .expect("write corrupt file");

        let err = store.load().await.expect_err("corrupt token");
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn no_temp_files_left_behind_after_save() {
        let (store, _dir) = store();
        store.save(&session()).await.expect("save");

        let mut entries = tokio::fs::read_dir(store.base_path()).await.expect("read dir");
        while let Some(entry) = entries.next_entry().await.expect("entry") {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "leftover temp file {name}");
        }
    }
}
