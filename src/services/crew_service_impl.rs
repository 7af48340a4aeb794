//! File-backed implementation of the `CrewService` trait.

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::constants::roster::{DEFAULT_CREW_CAPACITY, PLACEHOLDER_CALL_SIGN};
use crate::db::{Document, Outcome, Store, seed};
use crate::models::{NewVehicleConfig, SeatAssignment, Vehicle, VehicleConfig, next_id};
use crate::services::crew_assignment::{self, CrewPlan};
use crate::services::crew_service::{CrewError, CrewService, VehicleSeedReport};

pub struct FileCrewService {
    store: Store,
}

impl FileCrewService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn record_mutation(collection: &'static str, op: &'static str) {
    metrics::counter!("roster_mutations_total", "collection" => collection, "op" => op)
        .increment(1);
}

/// Trims names and positions and rejects layouts that cannot be filled sensibly.
fn validated(mut config: NewVehicleConfig) -> Result<NewVehicleConfig, CrewError> {
    config.vehicle = config.vehicle.trim().to_string();
    if config.vehicle.is_empty() {
        return Err(CrewError::Validation("Vehicle name cannot be empty".to_string()));
    }

    let mut positions = HashSet::new();
    for slot in &mut config.slots {
        slot.position = slot.position.trim().to_string();
        if slot.position.is_empty() {
            return Err(CrewError::Validation("Position cannot be empty".to_string()));
        }
        if !positions.insert(slot.position.clone()) {
            return Err(CrewError::Validation(format!(
                "Position {} appears twice",
                slot.position
            )));
        }
    }

    Ok(config)
}

fn same_vehicle(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl CrewService for FileCrewService {
    async fn list_configs(&self) -> Vec<VehicleConfig> {
        self.store.vehicle_configs().await
    }

    async fn get_config(&self, id: u64) -> Option<VehicleConfig> {
        self.list_configs().await.into_iter().find(|c| c.id == id)
    }

    async fn create_config(&self, config: NewVehicleConfig) -> Result<VehicleConfig, CrewError> {
        let config = validated(config)?;

        let created = self
            .store
            .update(
                Document::VehicleConfigs,
                seed::default_vehicle_configs(),
                |configs: &mut Vec<VehicleConfig>| {
                    if configs.iter().any(|c| same_vehicle(&c.vehicle, &config.vehicle)) {
                        return Outcome::Unchanged(Err(CrewError::Validation(format!(
                            "{} already has a crew layout",
                            config.vehicle
                        ))));
                    }
                    let Some(id) = next_id(configs) else {
                        return Outcome::Unchanged(Err(CrewError::IdsExhausted {
                            collection: "vehicle configs",
                        }));
                    };
                    let created = config.with_id(id);
                    configs.push(created.clone());
                    Outcome::Changed(Ok(created))
                },
            )
            .await??;

        record_mutation("vehicle_configs", "create");
        info!(id = created.id, vehicle = %created.vehicle, "Crew layout created");
        Ok(created)
    }

    async fn replace_config(
        &self,
        id: u64,
        config: NewVehicleConfig,
    ) -> Result<Option<VehicleConfig>, CrewError> {
        let config = validated(config)?;

        let replaced = self
            .store
            .update(
                Document::VehicleConfigs,
                seed::default_vehicle_configs(),
                |configs: &mut Vec<VehicleConfig>| {
                    let clash = configs
                        .iter()
                        .any(|c| c.id != id && same_vehicle(&c.vehicle, &config.vehicle));
                    if clash {
                        return Outcome::Unchanged(Err(CrewError::Validation(format!(
                            "{} already has a crew layout",
                            config.vehicle
                        ))));
                    }
                    let Some(slot) = configs.iter_mut().find(|c| c.id == id) else {
                        return Outcome::Unchanged(Ok(None));
                    };
                    *slot = config.with_id(id);
                    Outcome::Changed(Ok(Some(slot.clone())))
                },
            )
            .await??;

        if let Some(config) = &replaced {
            record_mutation("vehicle_configs", "replace");
            info!(id, vehicle = %config.vehicle, "Crew layout replaced");
        }
        Ok(replaced)
    }

    async fn delete_config(&self, id: u64) -> Result<bool, CrewError> {
        let removed = self
            .store
            .update(
                Document::VehicleConfigs,
                seed::default_vehicle_configs(),
                |configs: &mut Vec<VehicleConfig>| {
                    let before = configs.len();
                    configs.retain(|c| c.id != id);
                    if configs.len() == before {
                        Outcome::Unchanged(false)
                    } else {
                        Outcome::Changed(true)
                    }
                },
            )
            .await?;

        if removed {
            record_mutation("vehicle_configs", "delete");
            info!(id, "Crew layout deleted");
        }
        Ok(removed)
    }

    async fn ensure_standard_config(
        &self,
        vehicle: &str,
    ) -> Result<Option<VehicleConfig>, CrewError> {
        let Some(layout) = NewVehicleConfig::standard_for(vehicle) else {
            info!(vehicle, "No standard crew layout for this vehicle, configure it by hand");
            return Ok(None);
        };

        let added = self
            .store
            .update(
                Document::VehicleConfigs,
                seed::default_vehicle_configs(),
                |configs: &mut Vec<VehicleConfig>| {
                    if configs.iter().any(|c| same_vehicle(&c.vehicle, &layout.vehicle)) {
                        return Outcome::Unchanged(Ok(None));
                    }
                    let Some(id) = next_id(configs) else {
                        return Outcome::Unchanged(Err(CrewError::IdsExhausted {
                            collection: "vehicle configs",
                        }));
                    };
                    let added = layout.with_id(id);
                    configs.push(added.clone());
                    Outcome::Changed(Ok(Some(added)))
                },
            )
            .await??;

        if let Some(config) = &added {
            record_mutation("vehicle_configs", "create");
            info!(
                id = config.id,
                vehicle = %config.vehicle,
                vehicle_type = ?config.vehicle_type,
                "Standard crew layout added"
            );
        }
        Ok(added)
    }

    async fn seed_vehicles(&self) -> Result<VehicleSeedReport, CrewError> {
        let configs = self.list_configs().await;

        let report = self
            .store
            .update(
                Document::Vehicles,
                seed::default_vehicles(),
                |vehicles: &mut Vec<Vehicle>| {
                    let mut report = VehicleSeedReport::default();
                    for config in &configs {
                        if vehicles.iter().any(|v| v.name == config.vehicle) {
                            report.skipped.push(config.vehicle.clone());
                            continue;
                        }
                        let Some(id) = next_id(vehicles) else {
                            return Outcome::Unchanged(Err(CrewError::IdsExhausted {
                                collection: "vehicles",
                            }));
                        };
                        let seats = u32::try_from(config.slots.len()).unwrap_or(u32::MAX);
                        vehicles.push(Vehicle {
                            id,
                            name: config.vehicle.clone(),
                            radio_call_sign: PLACEHOLDER_CALL_SIGN.to_string(),
                            crew_capacity: if seats == 0 { DEFAULT_CREW_CAPACITY } else { seats },
                        });
                        report.created.push(config.vehicle.clone());
                    }
                    if report.created.is_empty() {
                        Outcome::Unchanged(Ok(report))
                    } else {
                        Outcome::Changed(Ok(report))
                    }
                },
            )
            .await??;

        if !report.created.is_empty() {
            record_mutation("vehicles", "seed");
        }
        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Vehicles created from crew layouts"
        );
        Ok(report)
    }

    async fn assign(&self, config_ids: Option<Vec<u64>>) -> Result<CrewPlan, CrewError> {
        let personnel = self.store.personnel().await;
        let mut configs = self.list_configs().await;

        if let Some(ids) = config_ids.filter(|ids| !ids.is_empty()) {
            let missing: Vec<u64> = ids
                .iter()
                .copied()
                .filter(|id| !configs.iter().any(|c| c.id == *id))
                .collect();
            if !missing.is_empty() {
                warn!(?missing, "Ignoring unknown crew layouts");
            }
            configs = ids
                .iter()
                .filter_map(|id| configs.iter().find(|c| c.id == *id).cloned())
                .collect();
        }

        let plan = crew_assignment::assign(&personnel, &configs);
        self.store.write(Document::Assignments, &plan.seats()).await?;

        metrics::counter!("crew_assignment_runs_total").increment(1);
        info!(
            vehicles = plan.total_vehicles,
            fulfilled = plan.total_fulfilled,
            unassigned = plan.unassigned.len(),
            warnings = plan.warnings.len(),
            "Crew assigned"
        );
        Ok(plan)
    }

    async fn current(&self) -> CrewPlan {
        let personnel = self.store.personnel().await;
        let configs = self.list_configs().await;
        let saved: Vec<SeatAssignment> = self.store.assignments().await;
        crew_assignment::from_saved(&personnel, &configs, &saved)
    }
}
