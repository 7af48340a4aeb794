use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::guard::{self, ANY_ROLE};
use super::{ApiError, ApiResponse, AppState, HealthStatus, SystemStatus};

pub async fn health_live() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus { status: "alive" }))
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    let vehicles = state.roster().list_vehicles().await.len();
    let readiness = state.readiness().await;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        started_at: state.started_at.to_rfc3339(),
        vehicles,
        kameraden: usize::try_from(readiness.available.total).unwrap_or(usize::MAX),
        ready: readiness.fulfilled,
    })))
}
