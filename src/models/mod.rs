pub mod crew;
pub mod operations;
pub mod qualification;
pub mod roster;
pub mod user;

pub use crew::{
    CrewConstraints, NewVehicleConfig, SeatAssignment, Slot, VehicleConfig, VehicleType,
};
pub use operations::{Incident, Settings};
pub use qualification::{Qualification, UnknownQualification};
pub use roster::{Identified, NewPerson, NewVehicle, Person, Vehicle, next_id};
pub use user::{AuthenticatedUser, Role, UserRecord, Users};
