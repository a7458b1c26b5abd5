use verconf_types::{ModelError, ValidationError};

/// Errors from version store operations.
///
/// Every variant is a caller-recoverable condition. When an operation returns
/// an error the store is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The submission failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No configuration with this name exists.
    #[error("config not found: {0}")]
    NotFound(String),

    /// A configuration with this name already exists; create is not an upsert.
    #[error("config already exists: {0}")]
    AlreadyExists(String),

    /// Rollback target is not strictly between 0 and the latest version.
    #[error("invalid version {requested} for {name}: must be in 1..{latest}")]
    InvalidVersion {
        name: String,
        requested: i64,
        latest: u64,
    },

    /// Fetch asked for a version outside the stored history.
    #[error("version {requested} not found for {name} ({available} versions stored)")]
    VersionNotFound {
        name: String,
        requested: i64,
        available: usize,
    },

    /// A version chain invariant was violated while building a configuration.
    #[error("version chain error: {0}")]
    Model(#[from] ModelError),

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
