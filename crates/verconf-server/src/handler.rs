//! Request handlers: decode, hand off to the store, encode.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use verconf_protocol::{ConfigNamesResponse, FetchQuery, HealthResponse, NameQuery, RollbackRequest};
use verconf_store::{ConfigStore, StoreError};
use verconf_types::{Configuration, ConfigurationSubmission, Version};

use crate::error::{ServerError, ServerResult};

/// Shared handler state. The store is built once and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ConfigStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ServerError::PayloadTooLarge(rejection.body_text())
            } else {
                ServerError::InvalidJson(rejection.body_text())
            }
        })
}

/// `POST /config`
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<ConfigurationSubmission>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Configuration>)> {
    let submission = json_body(body)?;
    let created = state.store.create(&submission)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /config/update`
pub async fn update_handler(
    State(state): State<AppState>,
    body: Result<Json<ConfigurationSubmission>, JsonRejection>,
) -> ServerResult<Json<Configuration>> {
    let submission = json_body(body)?;
    Ok(Json(state.store.update(&submission)?))
}

/// `POST /config/rollback`
pub async fn rollback_handler(
    State(state): State<AppState>,
    body: Result<Json<RollbackRequest>, JsonRejection>,
) -> ServerResult<Json<Configuration>> {
    let request = json_body(body)?;
    Ok(Json(state.store.rollback(&request.name, request.version)?))
}

/// `GET /config/fetch?name=..&version=..`
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> ServerResult<Json<Version>> {
    let name = query.name()?;
    let version = query.version()?;
    Ok(Json(state.store.fetch(name, version)?))
}

/// `GET /config/versions?name=..`
///
/// An unknown name is a bad request here, not a 404.
pub async fn versions_handler(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ServerResult<Json<Vec<Version>>> {
    let name = query.name()?;
    let versions = state.store.list_versions(name).map_err(|err| match err {
        StoreError::NotFound(name) => ServerError::UnknownConfig(name),
        other => ServerError::Store(other),
    })?;
    Ok(Json(versions))
}

/// `GET /configs`
pub async fn names_handler(State(state): State<AppState>) -> ServerResult<Json<ConfigNamesResponse>> {
    let names = state.store.list_names()?;
    Ok(Json(ConfigNamesResponse { names }))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
