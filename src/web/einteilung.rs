use axum::{
    extract::{RawForm, State},
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::Level;
use super::forms::FormData;
use super::{WebError, redirect_with, render, require};
use crate::api::AppState;
use crate::api::guard::ANY_ROLE;
use crate::models::VehicleConfig;
use crate::services::CrewPlan;

#[derive(Serialize)]
struct EinteilungView {
    einteilung: CrewPlan,
    fahrzeuge: Vec<VehicleConfig>,
}

pub async fn einteilung(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ANY_ROLE).await?;

    let view = EinteilungView {
        einteilung: state.crew().current().await,
        fahrzeuge: state.crew().list_configs().await,
    };
    render(&session, "einteilung", Some(user), view).await
}

/// Runs the assignment for the ticked layouts (`fahrzeug`), or for all of them.
pub async fn assign_crew(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    require(&state, &session, ANY_ROLE).await?;

    let form = FormData::from(body);
    let ids: Vec<u64> = form
        .all("fahrzeug")
        .filter_map(|v| v.trim().parse().ok())
        .collect();

    let plan = state.crew().assign(Some(ids)).await?;

    let message = format!(
        "Einteilung erstellt: {} von {} Fahrzeugen vollständig besetzt.",
        plan.total_fulfilled, plan.total_vehicles
    );
    let level = if plan.warnings.is_empty() && plan.total_fulfilled == plan.total_vehicles {
        Level::Ok
    } else {
        Level::Warn
    };
    redirect_with(&session, level, &message, "/einteilung").await
}
