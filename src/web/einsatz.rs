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
use crate::api::guard::{ADMIN_ONLY, ANY_ROLE};
use crate::models::{Incident, Settings};
use crate::services::ReadinessReport;
use crate::services::readiness::Shortfall;

#[derive(Serialize)]
struct EinsatzView {
    einsatz: Incident,
    settings: Settings,
    check: ReadinessReport,
    shortfalls: Vec<Shortfall>,
}

#[derive(Serialize)]
struct SettingsView {
    settings: Settings,
    einsatz: Incident,
}

pub async fn mein_einsatz(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ANY_ROLE).await?;

    let check = state.readiness().await;
    let view = EinsatzView {
        einsatz: state.settings().incident().await,
        settings: state.settings().settings().await,
        shortfalls: check.shortfalls(),
        check,
    };
    render(&session, "mein-einsatz", Some(user), view).await
}

pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = require(&state, &session, ADMIN_ONLY).await?;

    let view = SettingsView {
        settings: state.settings().settings().await,
        einsatz: state.settings().incident().await,
    };
    render(&session, "einstellungen", Some(user), view).await
}

/// Missing or malformed fields keep their stored value.
fn apply_form(form: &FormData, settings: Settings, incident: Incident) -> (Settings, Incident) {
    let settings = Settings {
        shift_length_hours: form.number_or("schichtlaenge_std", settings.shift_length_hours),
        min_agt: form.number_or("min_agt", settings.min_agt),
        min_maschinist: form.number_or("min_maschinist", settings.min_maschinist),
        min_gf: form.number_or("min_gf", settings.min_gf),
    };

    let incident = Incident {
        keyword: form
            .get("stichwort")
            .map_or(incident.keyword, |v| v.trim().to_string()),
        remark: form
            .get("bemerkung")
            .map_or(incident.remark, |v| v.trim().to_string()),
        crew_required: form.number_or("mannschaftsbedarf", incident.crew_required),
    };

    (settings, incident)
}

pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    require(&state, &session, ADMIN_ONLY).await?;

    let form = FormData::from(body);
    let (settings, incident) = apply_form(
        &form,
        state.settings().settings().await,
        state.settings().incident().await,
    );

    state.settings().save_both(settings, incident).await?;
    redirect_with(&session, Level::Ok, "Einstellungen gespeichert.", "/einstellungen").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_form_keeps_current_on_bad_input() {
        let form = FormData::parse(b"min_agt=3&min_gf=viele&stichwort=+TH%3A+VU+&mannschaftsbedarf=");
        let (settings, incident) = apply_form(&form, Settings::default(), Incident::default());

        assert_eq!(settings.min_agt, 3);
        assert_eq!(settings.min_gf, 1);
        assert_eq!(settings.min_maschinist, 1);
        assert_eq!(settings.shift_length_hours, 12);
        assert_eq!(incident.keyword, "TH: VU");
        assert_eq!(incident.crew_required, 9);
        assert_eq!(incident.remark, "");
    }

    #[test]
    fn test_apply_form_clears_text_when_submitted_empty() {
        let current = Incident {
            remark: "Zufahrt über Hof".to_string(),
            ..Incident::default()
        };
        let form = FormData::parse(b"bemerkung=");
        let (_, incident) = apply_form(&form, Settings::default(), current);

        assert_eq!(incident.remark, "");
        assert_eq!(incident.keyword, "B: Kleinbrand");
    }
}
