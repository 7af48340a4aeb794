use std::sync::Arc;

use anyhow::Context;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CrewService, FileAuthService, FileCrewService, FileRosterService,
    FileSettingsService, RosterService, SettingsService,
};

/// Process-wide state: the services built on the store opened once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub auth_service: Arc<dyn AuthService>,

    pub roster_service: Arc<dyn RosterService>,

    pub settings_service: Arc<dyn SettingsService>,

    pub crew_service: Arc<dyn CrewService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::open(&config.general.data_dir)
            .await
            .with_context(|| format!("Failed to open data directory {}", config.general.data_dir))?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(FileAuthService::new(store.clone())),
            roster_service: Arc::new(FileRosterService::new(store.clone())),
            settings_service: Arc::new(FileSettingsService::new(store.clone())),
            crew_service: Arc::new(FileCrewService::new(store)),
        }
    }
}
