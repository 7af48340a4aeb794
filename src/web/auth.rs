use axum::{
    extract::{RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use super::flash::Level;
use super::forms::FormData;
use super::{WebError, redirect_with, render};
use crate::api::AppState;
use crate::api::guard;
use crate::constants::session::USER_KEY;

#[derive(Serialize)]
struct LoginView {
    action: &'static str,
}

pub async fn root(State(state): State<Arc<AppState>>, session: Session) -> Redirect {
    if guard::current_user(&state, &session).await.is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let user = guard::current_user(&state, &session).await;
    render(&session, "login", user, LoginView { action: "/login" }).await
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let form = FormData::from(body);
    let username = form.text("username");

    match state.auth().login(&username, &form.text("password")).await {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(USER_KEY, &user.username).await?;
            info!(username = %user.username, role = user.role.as_str(), "Logged in");
            redirect_with(&session, Level::Ok, "Erfolgreich eingeloggt.", "/dashboard").await
        }
        Err(_) => {
            info!(username = %username, "Login failed");
            redirect_with(&session, Level::Error, "Login fehlgeschlagen.", "/login").await
        }
    }
}

pub async fn logout(session: Session) -> Result<impl IntoResponse, WebError> {
    session.clear().await;
    session.cycle_id().await?;
    redirect_with(&session, Level::Ok, "Abgemeldet.", "/login").await
}
