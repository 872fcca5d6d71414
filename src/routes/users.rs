//! User base CRUD endpoints.
//!
//! Users are not indexed for search; these handlers only touch the
//! document store.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tracing::info;
use validator::Validate;

use crate::models::{AppState, UserBase};
use crate::routes::{
    id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody, UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users/filter", post(filter_users))
        .route("/api/users/count", post(count_users))
        .route("/api/users/{id}", get(get_user))
        .route(
            "/api/users",
            post(create_user).put(update_users).delete(delete_users),
        )
        .with_state(state)
}

async fn filter_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<UserBase>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.user_base,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<UserBase>, _>>()?;
    Ok(Json(results))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<UserBase>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.user_base,
            &id_filter("userid", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<UserBase>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let doc = to_document(&data)?;
    let result = state
        .store
        .insert(&state.config.collections.documents.user_base, &doc)
        .await?;

    info!(inserted_id = result.inserted_id, "created user");
    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_users(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let result = state
        .store
        .update(
            &state.config.collections.documents.user_base,
            &body.filters,
            &body.data,
        )
        .await?;

    Ok(Json(UpdateResponse {
        success: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        acknowledged: result.acknowledged,
    }))
}

async fn delete_users(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let result = state
        .store
        .delete(&state.config.collections.documents.user_base, &filters)
        .await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_users(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(&state.config.collections.documents.user_base, &filters)
        .await?;
    Ok(Json(count))
}
