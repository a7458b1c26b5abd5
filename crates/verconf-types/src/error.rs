use thiserror::Error;

/// Structural problems with a submitted configuration.
///
/// The display strings are the messages clients see in error bodies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("config name is required")]
    NameRequired,

    #[error("config type is required")]
    TypeRequired,

    #[error("invalid config type")]
    InvalidType(String),

    #[error("invalid config versions")]
    VersionsMissing,

    #[error("config versions is required")]
    VersionsEmpty,
}

/// Violations of the version-chain invariants of a [`crate::Configuration`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("configuration has no versions")]
    EmptyHistory,

    #[error("version sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
}
