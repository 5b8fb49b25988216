//! Error types for the key-lifecycle core.

use thiserror::Error;

/// Result type alias for `synapsed-keycore` operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Stable error taxonomy for every Core operation.
///
/// Variant payloads carry a human-readable cause only; private-key bytes
/// and protected blobs must never be placed in one of these.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Caller-provided values fail validation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation invoked before `initialize()` or after `shutdown()`.
    #[error("core not initialized")]
    NotInitialized,

    /// No row for the requested `key_id` among lookups valid for the caller.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The key exists but is not `active`.
    #[error("key not active: {0}")]
    KeyNotActive(String),

    /// HSM/KMS backend unreachable or timed out.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Key Store read or write failed.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// The underlying primitive rejected its input.
    #[error("primitive failure: {0}")]
    PrimitiveFailure(String),

    /// Per-key serialization lost a race; the caller should retry once.
    #[error("concurrency conflict on key {0}")]
    ConcurrencyConflict(String),
}

impl CoreError {
    /// True for errors a caller may retry (backend outages, lost races).
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::BackendUnavailable(_) | CoreError::ConcurrencyConflict(_))
    }

    /// A short, stable class name suitable for metrics labels and logs.
    pub fn class(&self) -> &'static str {
        match self {
            CoreError::InvalidParameter(_) => "invalid_parameter",
            CoreError::NotInitialized => "not_initialized",
            CoreError::KeyNotFound(_) => "key_not_found",
            CoreError::KeyNotActive(_) => "key_not_active",
            CoreError::BackendUnavailable(_) => "backend_unavailable",
            CoreError::StorageFailure(_) => "storage_failure",
            CoreError::PrimitiveFailure(_) => "primitive_failure",
            CoreError::ConcurrencyConflict(_) => "concurrency_conflict",
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::StorageFailure(err.to_string())
    }
}

impl From<synapsed_crypto::error::Error> for CoreError {
    fn from(err: synapsed_crypto::error::Error) -> Self {
        CoreError::PrimitiveFailure(err.to_string())
    }
}

#[cfg(feature = "hsm")]
impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::BackendUnavailable(err.to_string())
    }
}
