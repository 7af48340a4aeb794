//! Domain service for vehicle crew layouts and the current crew assignment.

use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::{NewVehicleConfig, VehicleConfig};
use crate::services::crew_assignment::CrewPlan;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No free id left in {collection}")]
    IdsExhausted { collection: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of creating vehicles from their layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleSeedReport {
    /// Vehicle names that were created.
    pub created: Vec<String>,
    /// Vehicle names that already existed.
    pub skipped: Vec<String>,
}

#[async_trait::async_trait]
pub trait CrewService: Send + Sync {
    async fn list_configs(&self) -> Vec<VehicleConfig>;

    async fn get_config(&self, id: u64) -> Option<VehicleConfig>;

    /// # Errors
    ///
    /// [`CrewError::Validation`] for an empty vehicle name, an empty or repeated
    /// position, or a vehicle that already has a layout.
    async fn create_config(&self, config: NewVehicleConfig) -> Result<VehicleConfig, CrewError>;

    /// Replaces the layout with `id`. `None` if there was none.
    async fn replace_config(
        &self,
        id: u64,
        config: NewVehicleConfig,
    ) -> Result<Option<VehicleConfig>, CrewError>;

    /// Removes the layout with `id`. Returns `false`, without writing, if there was none.
    async fn delete_config(&self, id: u64) -> Result<bool, CrewError>;

    /// Adds the standard layout for `vehicle` unless one exists under that name,
    /// compared case-insensitively. Returns the layout it added, if any.
    async fn ensure_standard_config(
        &self,
        vehicle: &str,
    ) -> Result<Option<VehicleConfig>, CrewError>;

    /// Creates a vehicle for every layout whose vehicle does not exist yet.
    async fn seed_vehicles(&self) -> Result<VehicleSeedReport, CrewError>;

    /// Seats all personnel on the layouts in `config_ids` (all layouts when
    /// `None` or empty) and saves the result as the current assignment.
    async fn assign(&self, config_ids: Option<Vec<u64>>) -> Result<CrewPlan, CrewError>;

    /// The saved assignment against today's layouts and personnel.
    async fn current(&self) -> CrewPlan;
}
