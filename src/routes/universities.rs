//! University CRUD endpoints (searchable).

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tracing::info;
use validator::Validate;

use crate::models::{AppState, University};
use crate::routes::{
    doc_text, id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody,
    UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/universities/filter", post(filter_universities))
        .route("/api/universities/count", post(count_universities))
        .route("/api/universities/{id}", get(get_university))
        .route(
            "/api/universities",
            post(create_university)
                .put(update_universities)
                .delete(delete_universities),
        )
        .with_state(state)
}

fn metadata_for(doc: &mut Map<String, Value>) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "university_id".to_string(),
        doc.remove("university_id").unwrap_or(Value::Null),
    );
    metadata.insert(
        "reference".to_string(),
        doc.remove("contact").unwrap_or(Value::Null),
    );
    metadata
}

async fn filter_universities(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<University>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.universities,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<University>, _>>()?;
    Ok(Json(results))
}

async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<University>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.universities,
            &id_filter("university_id", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_university(
    State(state): State<AppState>,
    Json(data): Json<University>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let collections = &state.config.collections;
    let mut doc = to_document(&data)?;
    let result = state
        .store
        .insert(&collections.documents.universities, &doc)
        .await?;

    let metadata = metadata_for(&mut doc);
    state
        .search
        .insert(&collections.search.universities, &doc_text(&doc)?, &metadata)
        .await?;

    info!(inserted_id = result.inserted_id, "created university");
    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_universities(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .update(&collections.documents.universities, &body.filters, &body.data)
        .await?;

    if result.modified_count > 0 {
        let docs = state
            .store
            .get_many(&collections.documents.universities, &body.filters, 0, None)
            .await?;
        for doc in docs {
            let Value::Object(mut doc) = doc else {
                continue;
            };
            let id = doc.get("university_id").cloned().unwrap_or(Value::Null);
            let metadata = metadata_for(&mut doc);
            let mut filters = Map::new();
            filters.insert("university_id".to_string(), id);
            state
                .search
                .update(
                    &collections.search.universities,
                    &filters,
                    &doc_text(&doc)?,
                    &metadata,
                )
                .await?;
        }
    }

    Ok(Json(UpdateResponse {
        success: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        acknowledged: result.acknowledged,
    }))
}

async fn delete_universities(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .delete(&collections.documents.universities, &filters)
        .await?;

    if result.deleted_count > 0 {
        state
            .search
            .delete(&collections.search.universities, &filters)
            .await?;
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_universities(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(&state.config.collections.documents.universities, &filters)
        .await?;
    Ok(Json(count))
}
