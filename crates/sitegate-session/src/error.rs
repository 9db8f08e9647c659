//! Session and storage error types.

use sitegate_types::{ApiError, ErrorCode, WireError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the durable session storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure reading or writing a storage key.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage key held JSON that no longer parses.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage directory could not be created.
    #[error("failed to create storage directory: {path}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates a `DirectoryCreation` error.
    #[must_use]
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "SESSION_STORAGE_IO",
            Self::Serialization(_) => "SESSION_STORAGE_SERIALIZATION",
            Self::DirectoryCreation { .. } => "SESSION_STORAGE_DIRECTORY",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Disk state may change between attempts; corrupt JSON will not.
        matches!(self, Self::Io(_) | Self::DirectoryCreation { .. })
    }
}

/// Errors from session lifecycle operations.
///
/// A failed `verify` against the auth service is *not* an error here; it
/// resolves the session to anonymous. Only failures of the local machinery
/// (storage, wire decoding) surface as `SessionError`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Durable storage failed.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The auth service answered with an undecodable principal.
    #[error("invalid principal from auth service: {0}")]
    Wire(#[from] WireError),

    /// A login call against the auth service failed.
    #[error("login failed: {0}")]
    Login(#[source] ApiError),
}

impl ErrorCode for SessionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.code(),
            Self::Wire(_) => "SESSION_WIRE_INVALID",
            Self::Login(_) => "SESSION_LOGIN_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_recoverable(),
            Self::Wire(_) => false,
            Self::Login(e) => e.is_recoverable(),
        }
    }
}
