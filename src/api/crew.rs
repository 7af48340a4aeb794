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
use super::validation::validate_record_id;
use super::{ApiError, ApiResponse, AppState, CrewAssignmentRequest, DeleteResult};
use crate::models::{NewVehicleConfig, VehicleConfig};
use crate::services::CrewPlan;

pub async fn list_configs(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<VehicleConfig>>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(state.crew().list_configs().await)))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    session: Session,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<VehicleConfig>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;
    let Path(id) = id?;
    let id = validate_record_id(id)?;

    let config = state
        .crew()
        .get_config(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle config {id} not found")))?;
    Ok(Json(ApiResponse::success(config)))
}

pub async fn create_config(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<NewVehicleConfig>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleConfig>>), ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let config = state.crew().create_config(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(config))))
}

pub async fn replace_config(
    State(state): State<Arc<AppState>>,
    session: Session,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<NewVehicleConfig>, JsonRejection>,
) -> Result<Json<ApiResponse<VehicleConfig>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Path(id) = id?;
    let id = validate_record_id(id)?;
    let Json(payload) = payload?;

    let config = state
        .crew()
        .replace_config(id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle config {id} not found")))?;
    Ok(Json(ApiResponse::success(config)))
}

pub async fn delete_config(
    State(state): State<Arc<AppState>>,
    session: Session,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<DeleteResult>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Path(id) = id?;
    let id = validate_record_id(id)?;

    let deleted = state.crew().delete_config(id).await?;
    Ok(Json(ApiResponse::success(DeleteResult { id, deleted })))
}

pub async fn current_assignment(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<CrewPlan>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(state.crew().current().await)))
}

/// Any authenticated user may run the assignment; it replaces the saved one.
pub async fn assign_crew(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<CrewAssignmentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CrewPlan>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let plan = state.crew().assign(payload.vehicle_config_ids).await?;
    Ok(Json(ApiResponse::success(plan)))
}
