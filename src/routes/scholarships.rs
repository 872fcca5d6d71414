//! Scholarship CRUD endpoints.
//!
//! Scholarships are searchable: create/update/delete keep the vector
//! collection in sync through the synchronization helper.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tracing::info;
use validator::Validate;

use crate::models::{AppState, Scholarship};
use crate::routes::{
    doc_text, id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody,
    UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scholarships/filter", post(filter_scholarships))
        .route("/api/scholarships/count", post(count_scholarships))
        .route("/api/scholarships/{id}", get(get_scholarship))
        .route(
            "/api/scholarships",
            post(create_scholarship)
                .put(update_scholarships)
                .delete(delete_scholarships),
        )
        .with_state(state)
}

fn metadata_for(doc: &mut Map<String, Value>) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "scholarship_id".to_string(),
        doc.remove("scholarship_id").unwrap_or(Value::Null),
    );
    metadata.insert(
        "provider_id".to_string(),
        doc.remove("provider_id").unwrap_or(Value::Null),
    );
    metadata.insert(
        "reference".to_string(),
        doc.remove("contact").unwrap_or(Value::Null),
    );
    metadata
}

async fn filter_scholarships(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<Scholarship>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.scholarships,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Scholarship>, _>>()?;
    Ok(Json(results))
}

async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Scholarship>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.scholarships,
            &id_filter("scholarship_id", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_scholarship(
    State(state): State<AppState>,
    Json(data): Json<Scholarship>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let collections = &state.config.collections;
    let mut doc = to_document(&data)?;
    let result = state
        .store
        .insert(&collections.documents.scholarships, &doc)
        .await?;

    let metadata = metadata_for(&mut doc);
    state
        .search
        .insert(&collections.search.scholarships, &doc_text(&doc)?, &metadata)
        .await?;

    info!(inserted_id = result.inserted_id, "created scholarship");
    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_scholarships(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .update(&collections.documents.scholarships, &body.filters, &body.data)
        .await?;

    if result.modified_count > 0 {
        let docs = state
            .store
            .get_many(&collections.documents.scholarships, &body.filters, 0, None)
            .await?;
        for doc in docs {
            let Value::Object(mut doc) = doc else {
                continue;
            };
            let id = doc.get("scholarship_id").cloned().unwrap_or(Value::Null);
            let metadata = metadata_for(&mut doc);
            let mut filters = Map::new();
            filters.insert("scholarship_id".to_string(), id);
            state
                .search
                .update(
                    &collections.search.scholarships,
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

async fn delete_scholarships(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .delete(&collections.documents.scholarships, &filters)
        .await?;

    if result.deleted_count > 0 {
        state
            .search
            .delete(&collections.search.scholarships, &filters)
            .await?;
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_scholarships(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(&state.config.collections.documents.scholarships, &filters)
        .await?;
    Ok(Json(count))
}
