//! Application plan CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::{AppState, ApplicationTask};
use crate::routes::{
    id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody, UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/plans/filter", post(filter_plans))
        .route("/api/plans/count", post(count_plans))
        .route("/api/plans/{id}", get(get_plan))
        .route(
            "/api/plans",
            post(create_plan).put(update_plans).delete(delete_plans),
        )
        .with_state(state)
}

async fn filter_plans(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<ApplicationTask>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.plans,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<ApplicationTask>, _>>()?;
    Ok(Json(results))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<ApplicationTask>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.plans,
            &id_filter("plan_id", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_plan(
    State(state): State<AppState>,
    Json(data): Json<ApplicationTask>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let doc = to_document(&data)?;
    let result = state
        .store
        .insert(&state.config.collections.documents.plans, &doc)
        .await?;

    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_plans(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let result = state
        .store
        .update(
            &state.config.collections.documents.plans,
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

async fn delete_plans(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let result = state
        .store
        .delete(&state.config.collections.documents.plans, &filters)
        .await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_plans(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(&state.config.collections.documents.plans, &filters)
        .await?;
    Ok(Json(count))
}
