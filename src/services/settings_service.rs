//! Domain service for the settings and active incident singletons.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::{Incident, Settings};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Settings were written, the incident was not.
    #[error("Settings saved, incident not saved: {0}")]
    PartialSave(#[source] StoreError),
}

#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    async fn settings(&self) -> Settings;

    async fn incident(&self) -> Incident;

    async fn save_settings(&self, settings: Settings) -> Result<Settings, SettingsError>;

    async fn save_incident(&self, incident: Incident) -> Result<Incident, SettingsError>;

    /// Saves settings, then the incident. The two writes are independent.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Store`] if the settings write failed (nothing was saved),
    /// [`SettingsError::PartialSave`] if only the incident write failed.
    async fn save_both(&self, settings: Settings, incident: Incident) -> Result<(), SettingsError>;
}
