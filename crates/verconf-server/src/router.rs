use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use verconf_protocol::endpoints;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all verconf endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::CREATE, post(handler::create_handler))
        .route(endpoints::UPDATE, post(handler::update_handler))
        .route(endpoints::ROLLBACK, post(handler::rollback_handler))
        .route(endpoints::FETCH, get(handler::fetch_handler))
        .route(endpoints::VERSIONS, get(handler::versions_handler))
        .route(endpoints::NAMES, get(handler::names_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .with_state(state)
}

/// [`build_router`] plus the layers selected by `config`.
pub fn build_app(config: &ServerConfig, state: AppState) -> Router {
    let router = build_router(state).layer(DefaultBodyLimit::max(config.max_body_bytes));
    if config.request_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
