//! Browser-facing surface: form posts, redirects and one-shot notices.
//!
//! Pages are returned as JSON view models; markup is rendered elsewhere.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_sessions::Session;
use tracing::error;

use crate::api::AppState;
use crate::api::guard::{self, Access, Denial};
use crate::constants::notices;
use crate::models::{AuthenticatedUser, Role};
use crate::services::{CrewError, RosterError, SettingsError};

mod auth;
mod dashboard;
mod einsatz;
mod einteilung;
pub mod flash;
pub mod forms;
mod kameraden;
mod vehicles;

use flash::{Level, Notice};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/fahrzeuge",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/fahrzeuge/{id}/delete", post(vehicles::delete_vehicle))
        .route(
            "/kameraden",
            get(kameraden::list_kameraden).post(kameraden::create_kamerad),
        )
        .route("/kameraden/{id}/delete", post(kameraden::delete_kamerad))
        .route(
            "/seed-kameraden",
            get(kameraden::confirm_seed).post(kameraden::seed_kameraden),
        )
        .route("/mein-einsatz", get(einsatz::mein_einsatz))
        .route(
            "/einteilung",
            get(einteilung::einteilung).post(einteilung::assign_crew),
        )
        .route(
            "/einstellungen",
            get(einsatz::settings_page).post(einsatz::save_settings),
        )
}

#[derive(Debug, Error)]
pub enum WebError {
    /// A guard denial; the notice has already been queued.
    #[error("Redirecting to {0}")]
    Redirect(&'static str),

    #[error("Page not found")]
    NotFound,

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Crew(#[from] CrewError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

#[derive(Debug, Serialize)]
struct ErrorPage {
    page: &'static str,
    code: u16,
    msg: &'static str,
}

impl ErrorPage {
    fn respond(code: StatusCode, msg: &'static str) -> Response {
        let body = Self {
            page: "error",
            code: code.as_u16(),
            msg,
        };
        (code, Json(body)).into_response()
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(to).into_response(),
            Self::NotFound => ErrorPage::respond(StatusCode::NOT_FOUND, "Seite nicht gefunden"),
            other => {
                error!(error = %other, "Request failed");
                ErrorPage::respond(StatusCode::INTERNAL_SERVER_ERROR, "Serverfehler")
            }
        }
    }
}

pub async fn not_found() -> WebError {
    WebError::NotFound
}

/// Every rendered page: who is looking, pending notices, then the view itself.
#[derive(Debug, Serialize)]
struct Page<V> {
    page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<AuthenticatedUser>,
    notices: Vec<Notice>,
    #[serde(flatten)]
    view: V,
}

async fn render<V: Serialize>(
    session: &Session,
    page: &'static str,
    user: Option<AuthenticatedUser>,
    view: V,
) -> Result<Response, WebError> {
    let notices = flash::take(session).await?;
    Ok(Json(Page {
        page,
        user,
        notices,
        view,
    })
    .into_response())
}

/// Queues a notice and sends the browser on to `to`.
async fn redirect_with(
    session: &Session,
    level: Level,
    message: &str,
    to: &'static str,
) -> Result<Response, WebError> {
    flash::push(session, level, message).await?;
    Ok(Redirect::to(to).into_response())
}

/// Runs the shared guard; a denial becomes a notice plus redirect.
async fn require(
    state: &AppState,
    session: &Session,
    permitted: &[Role],
) -> Result<AuthenticatedUser, WebError> {
    match guard::authorize(state, session, permitted).await {
        Access::Allowed(user) => Ok(user),
        Access::Denied(Denial::Unauthenticated) => {
            flash::push(session, Level::Warn, notices::LOGIN_REQUIRED).await?;
            Err(WebError::Redirect("/login"))
        }
        Access::Denied(Denial::Forbidden) => {
            flash::push(session, Level::Error, notices::FORBIDDEN).await?;
            Err(WebError::Redirect("/dashboard"))
        }
    }
}

/// Record ids in paths must be integers; anything else is not a route.
fn parse_id(raw: &str) -> Result<u64, WebError> {
    raw.parse().map_err(|_| WebError::NotFound)
}
