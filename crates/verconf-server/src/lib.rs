//! HTTP server for verconf.
//!
//! Exposes the version store over a small JSON API. Handlers decode requests,
//! call into [`verconf_store::ConfigStore`] and map typed failures to status
//! codes; all version-chain logic lives in the store.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::VerconfServer;
