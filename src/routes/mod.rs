//! API Routes
//!
//! One router per entity group, each exposing the same CRUD surface:
//! - `POST .../filter` - list with pagination and a filter body
//! - `GET .../{id}` - fetch by the entity's primary ID field
//! - `POST .../` - create (searchable entities also index the record)
//! - `PUT .../` - bulk update by filters
//! - `DELETE .../` - bulk delete by filters
//! - `POST .../count` - count matching documents

pub mod campuses;
pub mod departments;
pub mod faculties;
pub mod health;
pub mod people;
pub mod plans;
pub mod programs;
pub mod providers;
pub mod research;
pub mod scholarships;
pub mod students;
pub mod universities;
pub mod users;

use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;
use crate::types::{AppError, AppResult};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(users::router(state.clone()))
        .merge(students::router(state.clone()))
        .merge(universities::router(state.clone()))
        .merge(faculties::router(state.clone()))
        .merge(departments::router(state.clone()))
        .merge(campuses::router(state.clone()))
        .merge(programs::router(state.clone()))
        .merge(people::router(state.clone()))
        .merge(research::router(state.clone()))
        .merge(scholarships::router(state.clone()))
        .merge(providers::router(state.clone()))
        .merge(plans::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn default_limit() -> i64 {
    100
}

/// Pagination query parameters for `POST .../filter`.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Body for bulk updates: which documents, and the fields to merge in.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub filters: Map<String, Value>,
    pub data: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub success: bool,
    pub inserted_id: String,
    pub acknowledged: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub acknowledged: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
    pub acknowledged: bool,
}

/// Serialize an entity into a document map.
pub(crate) fn to_document<T: Serialize>(data: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::invalid("request body must be a JSON object")),
    }
}

/// Filter map selecting a single entity by its primary ID field.
pub(crate) fn id_filter(key: &str, id: i64) -> Map<String, Value> {
    let mut filters = Map::new();
    filters.insert(key.to_string(), Value::from(id));
    filters
}

/// The text handed to the search index: a formatted dump of the
/// document's remaining fields.
pub(crate) fn doc_text(doc: &Map<String, Value>) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&Value::Object(doc.clone()))?)
}
