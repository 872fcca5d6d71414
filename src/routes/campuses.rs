//! University campus CRUD endpoints (searchable).

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::{AppState, Campus};
use crate::routes::{
    doc_text, id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody,
    UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/university-campuses/filter", post(filter_campuses))
        .route("/api/university-campuses/count", post(count_campuses))
        .route("/api/university-campuses/{id}", get(get_campus))
        .route(
            "/api/university-campuses",
            post(create_campus).put(update_campuses).delete(delete_campuses),
        )
        .with_state(state)
}

fn metadata_for(doc: &mut Map<String, Value>) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "campus_id".to_string(),
        doc.remove("campus_id").unwrap_or(Value::Null),
    );
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

async fn filter_campuses(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<Campus>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.university_campuses,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Campus>, _>>()?;
    Ok(Json(results))
}

async fn get_campus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Campus>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.university_campuses,
            &id_filter("campus_id", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_campus(
    State(state): State<AppState>,
    Json(data): Json<Campus>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let collections = &state.config.collections;
    let mut doc = to_document(&data)?;
    let result = state
        .store
        .insert(&collections.documents.university_campuses, &doc)
        .await?;

    let metadata = metadata_for(&mut doc);
    state
        .search
        .insert(
            &collections.search.university_campuses,
            &doc_text(&doc)?,
            &metadata,
        )
        .await?;

    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_campuses(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .update(
            &collections.documents.university_campuses,
            &body.filters,
            &body.data,
        )
        .await?;

    if result.modified_count > 0 {
        let docs = state
            .store
            .get_many(
                &collections.documents.university_campuses,
                &body.filters,
                0,
                None,
            )
            .await?;
        for doc in docs {
            let Value::Object(mut doc) = doc else {
                continue;
            };
            let id = doc.get("campus_id").cloned().unwrap_or(Value::Null);
            let metadata = metadata_for(&mut doc);
            let mut filters = Map::new();
            filters.insert("campus_id".to_string(), id);
            state
                .search
                .update(
                    &collections.search.university_campuses,
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

async fn delete_campuses(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let collections = &state.config.collections;
    let result = state
        .store
        .delete(&collections.documents.university_campuses, &filters)
        .await?;

    if result.deleted_count > 0 {
        state
            .search
            .delete(&collections.search.university_campuses, &filters)
            .await?;
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_campuses(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(
            &state.config.collections.documents.university_campuses,
            &filters,
        )
        .await?;
    Ok(Json(count))
}
