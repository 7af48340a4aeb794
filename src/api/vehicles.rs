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
use super::{ApiError, ApiResponse, AppState, DeleteResult, VehicleSeedResult};
use crate::models::{NewVehicle, Vehicle};

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    let vehicles = state.roster().list_vehicles().await;
    Ok(Json(ApiResponse::success(vehicles)))
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<NewVehicle>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let vehicle = state.roster().create_vehicle(payload).await?;
    state.crew().ensure_standard_config(&vehicle.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle))))
}

/// Creates a vehicle for every crew layout that has none yet.
pub async fn seed_vehicles(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<VehicleSeedResult>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;

    let report = state.crew().seed_vehicles().await?;
    let (created, skipped) = (report.created.len(), report.skipped.len());
    Ok(Json(ApiResponse::success(VehicleSeedResult {
        created,
        skipped,
        message: format!(
            "{created} Fahrzeuge erstellt, {skipped} übersprungen (existieren bereits)"
        ),
    })))
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    session: Session,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse<DeleteResult>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Path(id) = id?;
    let id = validate_record_id(id)?;

    let deleted = state.roster().delete_vehicle(id).await?;
    Ok(Json(ApiResponse::success(DeleteResult { id, deleted })))
}
