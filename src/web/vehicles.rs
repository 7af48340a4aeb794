use axum::{
    extract::{Path, RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::Level;
use super::forms::FormData;
use super::{WebError, parse_id, redirect_with, render, require};
use crate::api::AppState;
use crate::api::guard::ADMIN_ONLY;
use crate::constants::notices::NAME_REQUIRED;
use crate::models::{NewVehicle, Vehicle};
use crate::services::RosterError;

#[derive(Serialize)]
struct VehiclesView {
    vehicles: Vec<Vehicle>,
}

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ADMIN_ONLY).await?;
    let vehicles = state.roster().list_vehicles().await;
    render(&session, "fahrzeuge", Some(user), VehiclesView { vehicles }).await
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    require(&state, &session, ADMIN_ONLY).await?;

    let form = FormData::from(body);
    let vehicle = NewVehicle {
        name: form.text("name"),
        radio_call_sign: form.text("funk"),
        crew_capacity: form.number_or("besatzung", 0),
    };

    match state.roster().create_vehicle(vehicle).await {
        Ok(vehicle) => {
            state.crew().ensure_standard_config(&vehicle.name).await?;
            redirect_with(&session, Level::Ok, "Fahrzeug hinzugefügt.", "/fahrzeuge").await
        }
        Err(RosterError::Validation(_)) => {
            redirect_with(&session, Level::Warn, NAME_REQUIRED, "/fahrzeuge").await
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id)?;
    require(&state, &session, ADMIN_ONLY).await?;

    if state.roster().delete_vehicle(id).await? {
        redirect_with(&session, Level::Ok, "Fahrzeug gelöscht.", "/fahrzeuge").await
    } else {
        Ok(Redirect::to("/fahrzeuge").into_response())
    }
}
