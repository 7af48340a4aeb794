//! File-backed implementation of the `SettingsService` trait.

use async_trait::async_trait;
use tracing::{error, info};

use crate::db::{Document, Store};
use crate::models::{Incident, Settings};
use crate::services::settings_service::{SettingsError, SettingsService};

pub struct FileSettingsService {
    store: Store,
}

impl FileSettingsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsService for FileSettingsService {
    async fn settings(&self) -> Settings {
        self.store.settings().await
    }

    async fn incident(&self) -> Incident {
        self.store.incident().await
    }

    async fn save_settings(&self, settings: Settings) -> Result<Settings, SettingsError> {
        self.store.write(Document::Settings, &settings).await?;
        info!(?settings, "Settings saved");
        Ok(settings)
    }

    async fn save_incident(&self, incident: Incident) -> Result<Incident, SettingsError> {
        let incident = Incident {
            keyword: incident.keyword.trim().to_string(),
            remark: incident.remark.trim().to_string(),
            crew_required: incident.crew_required,
        };
        self.store.write(Document::Incident, &incident).await?;
        info!(keyword = %incident.keyword, crew_required = incident.crew_required, "Incident saved");
        Ok(incident)
    }

    async fn save_both(&self, settings: Settings, incident: Incident) -> Result<(), SettingsError> {
        self.save_settings(settings).await?;

        match self.save_incident(incident).await {
            Ok(_) => Ok(()),
            Err(SettingsError::Store(e)) | Err(SettingsError::PartialSave(e)) => {
                error!(error = %e, "Settings were saved but the incident write failed");
                Err(SettingsError::PartialSave(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> (FileSettingsService, Store) {
        let root = std::env::temp_dir()
            .join(format!("dienstplan-settings-test-{}", uuid::Uuid::new_v4()));
        let store = Store::open(root).await.unwrap();
        (FileSettingsService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_save_both_overwrites_documents() {
        let (service, store) = service().await;
        let settings = Settings {
            shift_length_hours: 24,
            min_agt: 4,
            min_maschinist: 2,
            min_gf: 1,
        };
        let incident = Incident {
            keyword: "  H: VU P  ".to_string(),
            remark: "B2 Richtung Berlin".to_string(),
            crew_required: 6,
        };

        service.save_both(settings.clone(), incident).await.unwrap();

        assert_eq!(store.settings().await, settings);
        let stored = store.incident().await;
        assert_eq!(stored.keyword, "H: VU P");
        assert_eq!(stored.crew_required, 6);
    }

    #[tokio::test]
    async fn test_incident_failure_after_settings_is_partial() {
        let (service, store) = service().await;
        // A directory where the incident file's temp path should go makes the write fail.
        std::fs::create_dir(store.root().join("einsatz.json.tmp")).unwrap();

        let settings = Settings {
            min_agt: 5,
            ..Settings::default()
        };
        let err = service
            .save_both(settings.clone(), Incident::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SettingsError::PartialSave(_)));
        assert_eq!(store.settings().await, settings);
    }
}
