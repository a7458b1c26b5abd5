//! Wire contract for the verconf HTTP API.
//!
//! Defines the endpoint paths plus the request and response shapes that sit
//! on either side of the version store. Configuration and version bodies are
//! the [`verconf_types`] model types themselves.

pub mod endpoint;
pub mod error;
pub mod message;

pub use endpoint::{endpoints, HealthResponse};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{ConfigNamesResponse, ErrorBody, FetchQuery, NameQuery, RollbackRequest};
