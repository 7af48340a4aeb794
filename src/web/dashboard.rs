use axum::{extract::State, response::Response};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{WebError, render, require};
use crate::api::AppState;
use crate::api::guard::ANY_ROLE;
use crate::models::{Incident, Person, Settings, Vehicle};
use crate::services::ReadinessReport;

#[derive(Serialize)]
struct DashboardView {
    vehicles: Vec<Vehicle>,
    kameraden: Vec<Person>,
    einsatz: Incident,
    settings: Settings,
    besetzung: ReadinessReport,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ANY_ROLE).await?;

    let view = DashboardView {
        vehicles: state.roster().list_vehicles().await,
        kameraden: state.roster().list_personnel().await,
        einsatz: state.settings().incident().await,
        settings: state.settings().settings().await,
        besetzung: state.readiness().await,
    };

    render(&session, "dashboard", Some(user), view).await
}
