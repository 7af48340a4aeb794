use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::constants::session::MAX_INACTIVITY_MINUTES;
use crate::services::{
    AuthService, CrewService, ReadinessReport, RosterService, SettingsService, readiness,
};
use crate::state::SharedState;
use crate::web;

pub mod auth;
mod besetzung;
mod crew;
mod einsatz;
mod error;
pub mod guard;
mod kameraden;
mod observability;
mod system;
pub mod types;
mod validation;
mod vehicles;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub started_at: chrono::DateTime<chrono::Utc>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn roster(&self) -> &Arc<dyn RosterService> {
        &self.shared.roster_service
    }

    #[must_use]
    pub fn settings(&self) -> &Arc<dyn SettingsService> {
        &self.shared.settings_service
    }

    #[must_use]
    pub fn crew(&self) -> &Arc<dyn CrewService> {
        &self.shared.crew_service
    }

    /// Evaluates readiness against the documents as they are right now.
    pub async fn readiness(&self) -> ReadinessReport {
        let personnel = self.roster().list_personnel().await;
        let settings = self.settings().settings().await;
        let incident = self.settings().incident().await;
        readiness::evaluate(&personnel, &settings, &incident)
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        started_at: chrono::Utc::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Full application: form pages at the root, JSON API under `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server
                .session_inactivity_minutes
                .clamp(1, MAX_INACTIVITY_MINUTES),
        )));

    Router::new()
        .merge(web::router())
        .nest("/api", api_router())
        .fallback(web::not_found)
        .layer(session_layer)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
}

fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles", post(vehicles::create_vehicle))
        .route("/vehicles/seed", post(vehicles::seed_vehicles))
        .route("/vehicles/{id}", delete(vehicles::delete_vehicle))
        .route(
            "/vehicle-configs",
            get(crew::list_configs).post(crew::create_config),
        )
        .route(
            "/vehicle-configs/{id}",
            get(crew::get_config)
                .put(crew::replace_config)
                .delete(crew::delete_config),
        )
        .route(
            "/crew-assignment",
            get(crew::current_assignment).post(crew::assign_crew),
        )
        .route("/kameraden", get(kameraden::list_kameraden))
        .route("/kameraden", post(kameraden::create_kamerad))
        .route("/kameraden/{id}", delete(kameraden::delete_kamerad))
        .route("/kameraden/seed", post(kameraden::seed_kameraden))
        .route("/qualifikationen", get(besetzung::list_qualifications))
        .route("/besetzungscheck", get(besetzung::get_readiness))
        .route("/einsatz", get(einsatz::get_incident).put(einsatz::update_incident))
        .route("/settings", get(einsatz::get_settings).put(einsatz::update_settings))
        .route("/system/health/live", get(system::health_live))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .fallback(api_not_found)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("No such endpoint".to_string())
}
