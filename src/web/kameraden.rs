use axum::{
    extract::{Path, RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::warn;

use super::flash::Level;
use super::forms::FormData;
use super::{WebError, parse_id, redirect_with, render, require};
use crate::api::AppState;
use crate::api::guard::{ADMIN_ONLY, ANY_ROLE};
use crate::constants::notices::NAME_REQUIRED;
use crate::constants::roster::SAMPLE_PERSONNEL_COUNT;
use crate::models::{NewPerson, Person, Qualification};
use crate::services::RosterError;

#[derive(Serialize)]
struct KameradenView {
    kameraden: Vec<Person>,
    all_quals: [Qualification; 6],
}

#[derive(Serialize)]
struct SeedConfirmView {
    warning: String,
    current: usize,
    generate: u64,
}

pub async fn list_kameraden(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ANY_ROLE).await?;

    let view = KameradenView {
        kameraden: state.roster().list_personnel().await,
        all_quals: Qualification::ALL,
    };
    render(&session, "kameraden", Some(user), view).await
}

pub async fn create_kamerad(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    require(&state, &session, ANY_ROLE).await?;

    let form = FormData::from(body);
    let mut qualifications = BTreeSet::new();
    for tag in form.all("qualifikationen") {
        match tag.parse::<Qualification>() {
            Ok(q) => {
                qualifications.insert(q);
            }
            Err(e) => warn!(error = %e, "Ignoring submitted qualification"),
        }
    }

    let person = NewPerson {
        name: form.text("name"),
        qualifications,
    };

    match state.roster().create_person(person).await {
        Ok(_) => redirect_with(&session, Level::Ok, "Kamerad hinzugefügt.", "/kameraden").await,
        Err(RosterError::Validation(_)) => {
            redirect_with(&session, Level::Warn, NAME_REQUIRED, "/kameraden").await
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_kamerad(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_id(&id)?;
    require(&state, &session, ADMIN_ONLY).await?;

    if state.roster().delete_person(id).await? {
        redirect_with(&session, Level::Ok, "Kamerad gelöscht.", "/kameraden").await
    } else {
        Ok(Redirect::to("/kameraden").into_response())
    }
}

/// GET shows what a bulk generate would do; it never mutates.
pub async fn confirm_seed(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ADMIN_ONLY).await?;
    let current = state.roster().list_personnel().await.len();

    let view = SeedConfirmView {
        warning: format!(
            "Alle {current} Kameraden werden durch {SAMPLE_PERSONNEL_COUNT} Beispielkameraden ersetzt."
        ),
        current,
        generate: SAMPLE_PERSONNEL_COUNT,
    };
    render(&session, "seed-kameraden", Some(user), view).await
}

pub async fn seed_kameraden(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    require(&state, &session, ADMIN_ONLY).await?;

    if FormData::from(body).text("confirm") != "yes" {
        return redirect_with(
            &session,
            Level::Warn,
            "Bitte bestätigen.",
            "/seed-kameraden",
        )
        .await;
    }

    let generated = state.roster().generate_personnel().await?;
    let message = format!("{} Beispielkameraden generiert.", generated.len());
    redirect_with(&session, Level::Ok, &message, "/kameraden").await
}
