use std::sync::Arc;

use tokio::net::TcpListener;

use verconf_store::{ConfigStore, InMemoryConfigStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_app;

/// verconf HTTP server.
pub struct VerconfServer {
    config: ServerConfig,
    store: Arc<dyn ConfigStore>,
}

impl VerconfServer {
    /// Server backed by a fresh in-memory store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryConfigStore::new()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn ConfigStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn ConfigStore> {
        Arc::clone(&self.store)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_app(&self.config, AppState::new(self.store()))
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("verconf server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
