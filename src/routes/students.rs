//! Student CRUD endpoints: profiles and preferences.
//!
//! Both collections are keyed on `userid` and neither is indexed for
//! search.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::{AppState, StudentPreference, StudentProfile};
use crate::routes::{
    id_filter, to_document, DeleteResponse, InsertResponse, Pagination, UpdateBody, UpdateResponse,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/student-profiles/filter", post(filter_profiles))
        .route("/api/student-profiles/count", post(count_profiles))
        .route("/api/student-profiles/{id}", get(get_profile))
        .route(
            "/api/student-profiles",
            post(create_profile).put(update_profiles).delete(delete_profiles),
        )
        .route("/api/student-preferences/filter", post(filter_preferences))
        .route("/api/student-preferences/count", post(count_preferences))
        .route("/api/student-preferences/{id}", get(get_preference))
        .route(
            "/api/student-preferences",
            post(create_preference)
                .put(update_preferences)
                .delete(delete_preferences),
        )
        .with_state(state)
}

// Student profiles

async fn filter_profiles(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<StudentProfile>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.student_profiles,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<StudentProfile>, _>>()?;
    Ok(Json(results))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<StudentProfile>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.student_profiles,
            &id_filter("userid", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_profile(
    State(state): State<AppState>,
    Json(data): Json<StudentProfile>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let doc = to_document(&data)?;
    let result = state
        .store
        .insert(&state.config.collections.documents.student_profiles, &doc)
        .await?;

    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_profiles(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let result = state
        .store
        .update(
            &state.config.collections.documents.student_profiles,
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

async fn delete_profiles(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let result = state
        .store
        .delete(
            &state.config.collections.documents.student_profiles,
            &filters,
        )
        .await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_profiles(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(
            &state.config.collections.documents.student_profiles,
            &filters,
        )
        .await?;
    Ok(Json(count))
}

// Student preferences

async fn filter_preferences(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<Vec<StudentPreference>>> {
    let docs = state
        .store
        .get_many(
            &state.config.collections.documents.student_preferences,
            &filters,
            page.skip,
            Some(page.limit),
        )
        .await?;
    let results = docs
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<StudentPreference>, _>>()?;
    Ok(Json(results))
}

async fn get_preference(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<StudentPreference>>> {
    let doc = state
        .store
        .get_one(
            &state.config.collections.documents.student_preferences,
            &id_filter("userid", id),
        )
        .await?;
    Ok(Json(doc.map(serde_json::from_value).transpose()?))
}

async fn create_preference(
    State(state): State<AppState>,
    Json(data): Json<StudentPreference>,
) -> AppResult<Json<InsertResponse>> {
    data.validate()
        .map_err(|e| AppError::invalid(e.to_string()))?;

    let doc = to_document(&data)?;
    let result = state
        .store
        .insert(
            &state.config.collections.documents.student_preferences,
            &doc,
        )
        .await?;

    Ok(Json(InsertResponse {
        success: true,
        inserted_id: result.inserted_id.to_string(),
        acknowledged: result.acknowledged,
    }))
}

async fn update_preferences(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> AppResult<Json<UpdateResponse>> {
    let result = state
        .store
        .update(
            &state.config.collections.documents.student_preferences,
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

async fn delete_preferences(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<DeleteResponse>> {
    let result = state
        .store
        .delete(
            &state.config.collections.documents.student_preferences,
            &filters,
        )
        .await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        acknowledged: result.acknowledged,
    }))
}

async fn count_preferences(
    State(state): State<AppState>,
    Json(filters): Json<Map<String, Value>>,
) -> AppResult<Json<i64>> {
    let count = state
        .store
        .count(
            &state.config.collections.documents.student_preferences,
            &filters,
        )
        .await?;
    Ok(Json(count))
}
