use thiserror::Error;

/// Malformed request parameters, caught before the store is consulted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("config name is required")]
    MissingName,

    #[error("invalid version format: {0}")]
    InvalidVersionFormat(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
