//! File-backed implementation of the `RosterService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::roster::SAMPLE_PERSONNEL_COUNT;
use crate::db::{Document, Outcome, Store, seed};
use crate::models::{NewPerson, NewVehicle, Person, Vehicle, next_id};
use crate::services::generator;
use crate::services::roster_service::{RosterError, RosterService};

pub struct FileRosterService {
    store: Store,
}

impl FileRosterService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn required_name(name: &str) -> Result<String, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::Validation("Name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

fn record_mutation(collection: &'static str, op: &'static str) {
    metrics::counter!("roster_mutations_total", "collection" => collection, "op" => op)
        .increment(1);
}

#[async_trait]
impl RosterService for FileRosterService {
    async fn list_vehicles(&self) -> Vec<Vehicle> {
        self.store.vehicles().await
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<Vehicle, RosterError> {
        let name = required_name(&vehicle.name)?;

        let created = self
            .store
            .update(
                Document::Vehicles,
                seed::default_vehicles(),
                |vehicles: &mut Vec<Vehicle>| {
                    let Some(id) = next_id(vehicles) else {
                        return Outcome::Unchanged(Err(RosterError::IdsExhausted {
                            collection: "vehicles",
                        }));
                    };
                    let created = Vehicle {
                        id,
                        name,
                        radio_call_sign: vehicle.radio_call_sign.trim().to_string(),
                        crew_capacity: vehicle.crew_capacity,
                    };
                    vehicles.push(created.clone());
                    Outcome::Changed(Ok(created))
                },
            )
            .await??;

        record_mutation("vehicles", "create");
        info!(id = created.id, name = %created.name, "Vehicle created");
        Ok(created)
    }

    async fn delete_vehicle(&self, id: u64) -> Result<bool, RosterError> {
        let removed = self
            .store
            .update(
                Document::Vehicles,
                seed::default_vehicles(),
                |vehicles: &mut Vec<Vehicle>| {
                    let before = vehicles.len();
                    vehicles.retain(|v| v.id != id);
                    if vehicles.len() == before {
                        Outcome::Unchanged(false)
                    } else {
                        Outcome::Changed(true)
                    }
                },
            )
            .await?;

        if removed {
            record_mutation("vehicles", "delete");
            info!(id, "Vehicle deleted");
        }
        Ok(removed)
    }

    async fn list_personnel(&self) -> Vec<Person> {
        self.store.personnel().await
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, RosterError> {
        let name = required_name(&person.name)?;

        let created = self
            .store
            .update(
                Document::Personnel,
                seed::default_personnel(),
                |personnel: &mut Vec<Person>| {
                    let Some(id) = next_id(personnel) else {
                        return Outcome::Unchanged(Err(RosterError::IdsExhausted {
                            collection: "personnel",
                        }));
                    };
                    let created = Person {
                        id,
                        name,
                        qualifications: person.qualifications,
                    };
                    personnel.push(created.clone());
                    Outcome::Changed(Ok(created))
                },
            )
            .await??;

        record_mutation("personnel", "create");
        info!(id = created.id, name = %created.name, "Kamerad created");
        Ok(created)
    }

    async fn delete_person(&self, id: u64) -> Result<bool, RosterError> {
        let removed = self
            .store
            .update(
                Document::Personnel,
                seed::default_personnel(),
                |personnel: &mut Vec<Person>| {
                    let before = personnel.len();
                    personnel.retain(|p| p.id != id);
                    if personnel.len() == before {
                        Outcome::Unchanged(false)
                    } else {
                        Outcome::Changed(true)
                    }
                },
            )
            .await?;

        if removed {
            record_mutation("personnel", "delete");
            info!(id, "Kamerad deleted");
        }
        Ok(removed)
    }

    async fn generate_personnel(&self) -> Result<Vec<Person>, RosterError> {
        let personnel = {
            let mut rng = rand::rng();
            generator::generate_personnel(&mut rng, SAMPLE_PERSONNEL_COUNT)
        };

        self.store.write(Document::Personnel, &personnel).await?;

        record_mutation("personnel", "generate");
        info!(count = personnel.len(), "Replaced personnel with generated roster");
        Ok(personnel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Qualification;

    async fn empty_service() -> (FileRosterService, Store) {
        let root =
            std::env::temp_dir().join(format!("dienstplan-roster-test-{}", uuid::Uuid::new_v4()));
        let store = Store::open(root).await.unwrap();
        store.write(Document::Vehicles, &Vec::<Vehicle>::new()).await.unwrap();
        store.write(Document::Personnel, &Vec::<Person>::new()).await.unwrap();
        (FileRosterService::new(store.clone()), store)
    }

    fn new_vehicle(name: &str) -> NewVehicle {
        NewVehicle {
            name: name.to_string(),
            radio_call_sign: " Florian 1/46/1 ".to_string(),
            crew_capacity: 9,
        }
    }

    fn new_person(name: &str) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            qualifications: [Qualification::Tm].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_sequential_creates_get_ids_in_order() {
        let (roster, _) = empty_service().await;

        for i in 1..=5 {
            let created = roster.create_vehicle(new_vehicle(&format!("LF {i}"))).await.unwrap();
            assert_eq!(created.id, i);
        }

        let ids: Vec<u64> = roster.list_vehicles().await.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_create_trims_and_rejects_empty_name() {
        let (roster, _) = empty_service().await;

        let created = roster.create_vehicle(new_vehicle("  HLF 20  ")).await.unwrap();
        assert_eq!(created.name, "HLF 20");
        assert_eq!(created.radio_call_sign, "Florian 1/46/1");

        let err = roster.create_person(new_person("   ")).await.unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
        assert!(roster.list_personnel().await.is_empty());
    }

    #[tokio::test]
    async fn test_recreate_after_delete_uses_max_plus_one() {
        let (roster, _) = empty_service().await;
        for name in ["A", "B", "C"] {
            roster.create_person(new_person(name)).await.unwrap();
        }

        assert!(roster.delete_person(2).await.unwrap());
        let created = roster.create_person(new_person("D")).await.unwrap();
        assert_eq!(created.id, 4);

        assert!(roster.delete_person(4).await.unwrap());
        let created = roster.create_person(new_person("E")).await.unwrap();
        assert_eq!(created.id, 4);

        let ids: Vec<u64> = roster.list_personnel().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_create_fails_cleanly_when_ids_run_out() {
        let (roster, store) = empty_service().await;
        let top = vec![Vehicle {
            id: u64::MAX,
            name: "A".to_string(),
            radio_call_sign: String::new(),
            crew_capacity: 0,
        }];
        store.write(Document::Vehicles, &top).await.unwrap();

        let err = roster.create_vehicle(new_vehicle("B")).await.unwrap_err();

        assert!(matches!(err, RosterError::IdsExhausted { collection: "vehicles" }));
        assert_eq!(roster.list_vehicles().await, top);
    }

    #[tokio::test]
    async fn test_delete_missing_id_leaves_file_untouched() {
        let (roster, store) = empty_service().await;
        roster.create_vehicle(new_vehicle("HLF 20")).await.unwrap();
        let path = store.path(Document::Vehicles);
        let before = std::fs::read(&path).unwrap();

        assert!(!roster.delete_vehicle(99).await.unwrap());

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_generate_replaces_personnel() {
        let (roster, _) = empty_service().await;
        roster.create_person(new_person("Vorher")).await.unwrap();

        let generated = roster.generate_personnel().await.unwrap();

        assert_eq!(generated.len(), 77);
        let stored = roster.list_personnel().await;
        assert_eq!(stored, generated);
        let ids: Vec<u64> = stored.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=77).collect::<Vec<_>>());
        assert!(stored.iter().all(|p| p.holds(Qualification::Tm)));
    }
}
