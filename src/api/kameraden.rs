use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::guard::{self, ADMIN_ONLY, ANY_ROLE};
use super::validation::{validate_record_id, validate_seed_confirmation};
use super::{ApiError, ApiResponse, AppState, DeleteResult, SeedRequest, SeedResult};
use crate::models::{NewPerson, Person};

pub async fn list_kameraden(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Person>>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    let personnel = state.roster().list_personnel().await;
    Ok(Json(ApiResponse::success(personnel)))
}

/// Any authenticated user may add a Kamerad; only admins may delete.
pub async fn create_kamerad(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Person>>), ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let person = state.roster().create_person(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(person))))
}

pub async fn delete_kamerad(
    State(state): State<Arc<AppState>>,
    session: Session,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<DeleteResult>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Path(id) = id?;
    let id = validate_record_id(id)?;

    let deleted = state.roster().delete_person(id).await?;
    Ok(Json(ApiResponse::success(DeleteResult { id, deleted })))
}

pub async fn seed_kameraden(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<SeedRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SeedResult>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Json(payload) = payload?;
    validate_seed_confirmation(payload.confirm)?;

    let generated = state.roster().generate_personnel().await?;
    Ok(Json(ApiResponse::success(SeedResult {
        generated: generated.len(),
    })))
}
