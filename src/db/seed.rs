//! Default contents written when a document does not exist yet.

use crate::models::{
    NewVehicleConfig, Person, Qualification, Role, UserRecord, Users, Vehicle, VehicleConfig,
};

#[must_use]
pub fn default_users() -> Users {
    let mut users = Users::new();
    users.insert(
        "admin".to_string(),
        UserRecord {
            password: "admin".to_string(),
            role: Role::Admin,
            name: "Admin".to_string(),
        },
    );
    users.insert(
        "member".to_string(),
        UserRecord {
            password: "member".to_string(),
            role: Role::Member,
            name: "Mitglied".to_string(),
        },
    );
    users
}

#[must_use]
pub fn default_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: 1,
            name: "HLF 20".to_string(),
            radio_call_sign: "Florian Schwedt 1/46/1".to_string(),
            crew_capacity: 9,
        },
        Vehicle {
            id: 2,
            name: "DLK 23/12".to_string(),
            radio_call_sign: "Florian Schwedt 1/33/1".to_string(),
            crew_capacity: 3,
        },
    ]
}

#[must_use]
pub fn default_personnel() -> Vec<Person> {
    vec![
        Person {
            id: 1,
            name: "Max Mustermann".to_string(),
            qualifications: [Qualification::Tm, Qualification::Sprechfunker]
                .into_iter()
                .collect(),
        },
        Person {
            id: 2,
            name: "Anna Beispiel".to_string(),
            qualifications: [Qualification::Tm, Qualification::Agt].into_iter().collect(),
        },
    ]
}

/// Standard layouts for the default vehicles.
#[must_use]
pub fn default_vehicle_configs() -> Vec<VehicleConfig> {
    default_vehicles()
        .iter()
        .filter_map(|vehicle| NewVehicleConfig::standard_for(&vehicle.name))
        .zip(1..)
        .map(|(layout, id)| layout.with_id(id))
        .collect()
}
