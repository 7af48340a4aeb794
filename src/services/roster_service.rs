//! Domain service for the vehicle and personnel collections.
//!
//! Records are created and deleted, never edited. Ids are assigned as one past
//! the largest id still present, so a surviving record's id is never reused.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::{NewPerson, NewVehicle, Person, Vehicle};

/// Errors specific to roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The largest id in `collection` is already `u64::MAX`.
    #[error("No free id left in {collection}")]
    IdsExhausted { collection: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Domain service trait for the roster.
#[async_trait::async_trait]
pub trait RosterService: Send + Sync {
    async fn list_vehicles(&self) -> Vec<Vehicle>;

    /// Appends a vehicle and persists the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] if the trimmed name is empty and
    /// [`RosterError::IdsExhausted`] if no id is left above the largest one.
    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<Vehicle, RosterError>;

    /// Removes the vehicle with `id`. Returns `false`, without writing, if there was none.
    async fn delete_vehicle(&self, id: u64) -> Result<bool, RosterError>;

    async fn list_personnel(&self) -> Vec<Person>;

    /// Appends a person and persists the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] if the trimmed name is empty.
    async fn create_person(&self, person: NewPerson) -> Result<Person, RosterError>;

    /// Removes the person with `id`. Returns `false`, without writing, if there was none.
    async fn delete_person(&self, id: u64) -> Result<bool, RosterError>;

    /// Replaces all personnel with a generated sample roster.
    async fn generate_personnel(&self) -> Result<Vec<Person>, RosterError>;
}
