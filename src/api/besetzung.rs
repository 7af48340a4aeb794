use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::guard::{self, ANY_ROLE};
use super::{ApiError, ApiResponse, AppState, QualificationDto};
use crate::models::Qualification;
use crate::services::ReadinessReport;

/// GET /besetzungscheck
/// Live staffing verdict; never cached
pub async fn get_readiness(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<ReadinessReport>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(state.readiness().await)))
}

pub async fn list_qualifications(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<QualificationDto>>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    let qualifications = Qualification::ALL
        .into_iter()
        .map(|q| QualificationDto { tag: q.as_str() })
        .collect();

    Ok(Json(ApiResponse::success(qualifications)))
}
