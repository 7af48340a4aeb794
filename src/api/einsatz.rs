use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::guard::{self, ADMIN_ONLY, ANY_ROLE};
use super::{ApiError, ApiResponse, AppState};
use crate::models::{Incident, Settings};

pub async fn get_incident(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Incident>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(state.settings().incident().await)))
}

pub async fn update_incident(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<Incident>, JsonRejection>,
) -> Result<Json<ApiResponse<Incident>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let incident = state.settings().save_incident(payload).await?;
    Ok(Json(ApiResponse::success(incident)))
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(state.settings().settings().await)))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<Settings>, JsonRejection>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    guard::authorize(&state, &session, ADMIN_ONLY)
        .await
        .into_result()?;
    let Json(payload) = payload?;

    let settings = state.settings().save_settings(payload).await?;
    Ok(Json(ApiResponse::success(settings)))
}
