use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::guard::{self, ANY_ROLE};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::constants::session::USER_KEY;
use crate::models::AuthenticatedUser;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login
/// Check credentials against the users document and start a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthenticatedUser>>, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }

    let user = match state.auth().login(&payload.username, &payload.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(username = %payload.username.trim(), "Login failed");
            return Err(e.into());
        }
    };

    session.cycle_id().await?;
    session.insert(USER_KEY, &user.username).await?;
    tracing::info!(username = %user.username, role = user.role.as_str(), "Logged in");

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    session.flush().await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /auth/me
/// The session's user, as currently stored
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<AuthenticatedUser>>, ApiError> {
    let user = guard::authorize(&state, &session, ANY_ROLE)
        .await
        .into_result()?;

    Ok(Json(ApiResponse::success(user)))
}
