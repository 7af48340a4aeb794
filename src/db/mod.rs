//! File-backed document store.
//!
//! Every document is one JSON file under the data directory and is always
//! read and written whole. Reads never fail: a missing document is created
//! with its default, an unreadable one yields the default and is left as is.
//!
//! Writes to the same document are serialized through a per-document lock,
//! and [`Store::update`] holds that lock across the read-modify-write. There
//! is no transaction spanning two documents.

use serde::{Serialize, de::DeserializeOwned};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{Incident, Person, SeatAssignment, Settings, Users, Vehicle, VehicleConfig};

pub mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Users,
    Vehicles,
    Personnel,
    Incident,
    Settings,
    VehicleConfigs,
    Assignments,
}

impl Document {
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Vehicles,
        Self::Personnel,
        Self::Incident,
        Self::Settings,
        Self::VehicleConfigs,
        Self::Assignments,
    ];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Vehicles => "vehicles.json",
            Self::Personnel => "kameraden.json",
            Self::Incident => "einsatz.json",
            Self::Settings => "settings.json",
            Self::VehicleConfigs => "fahrzeugkonfig.json",
            Self::Assignments => "einteilung.json",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Users => 0,
            Self::Vehicles => 1,
            Self::Personnel => 2,
            Self::Incident => 3,
            Self::Settings => 4,
            Self::VehicleConfigs => 5,
            Self::Assignments => 6,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write {document}: {source}")]
    Io {
        document: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {document}: {source}")]
    Serialize {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of a read-modify-write closure passed to [`Store::update`].
#[derive(Debug)]
pub enum Outcome<R> {
    /// The value was modified and must be persisted.
    Changed(R),
    /// Nothing changed; the document is not rewritten.
    Unchanged(R),
}

struct StoreInner {
    root: PathBuf,
    locks: [Mutex<()>; Document::ALL.len()],
}

#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Opens the store at `root`, creating the directory and seeding any
    /// document that does not exist yet.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StoreError::Io {
                document: "data directory",
                source,
            })?;

        let store = Self {
            inner: Arc::new(StoreInner {
                root,
                locks: Default::default(),
            }),
        };

        for document in Document::ALL {
            if !store.path(document).exists() {
                store.seed(document).await?;
            }
        }

        info!("Document store ready at {}", store.root().display());
        Ok(store)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    #[must_use]
    pub fn path(&self, document: Document) -> PathBuf {
        self.inner.root.join(document.file_name())
    }

    /// Returns the parsed document, or `default` when it is missing or unparsable.
    ///
    /// A missing document is created with `default`. An unparsable one is not repaired.
    pub async fn read<T>(&self, document: Document, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.lock(document).await;
        self.read_unlocked(document, default).await
    }

    /// Replaces the full contents of `document` with `value`.
    pub async fn write<T: Serialize>(&self, document: Document, value: &T) -> Result<(), StoreError> {
        let _guard = self.lock(document).await;
        self.write_unlocked(document, value).await
    }

    /// Read-modify-write of one document under its lock.
    pub async fn update<T, R, F>(&self, document: Document, default: T, f: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> Outcome<R>,
    {
        let _guard = self.lock(document).await;
        let mut value = self.read_unlocked(document, default).await;

        match f(&mut value) {
            Outcome::Changed(result) => {
                self.write_unlocked(document, &value).await?;
                Ok(result)
            }
            Outcome::Unchanged(result) => {
                debug!(document = document.file_name(), "Update left document unchanged");
                Ok(result)
            }
        }
    }

    pub async fn users(&self) -> Users {
        self.read(Document::Users, seed::default_users()).await
    }

    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.read(Document::Vehicles, seed::default_vehicles()).await
    }

    pub async fn personnel(&self) -> Vec<Person> {
        self.read(Document::Personnel, seed::default_personnel()).await
    }

    pub async fn incident(&self) -> Incident {
        self.read(Document::Incident, Incident::default()).await
    }

    pub async fn settings(&self) -> Settings {
        self.read(Document::Settings, Settings::default()).await
    }

    pub async fn vehicle_configs(&self) -> Vec<VehicleConfig> {
        self.read(Document::VehicleConfigs, seed::default_vehicle_configs()).await
    }

    pub async fn assignments(&self) -> Vec<SeatAssignment> {
        self.read(Document::Assignments, Vec::new()).await
    }

    async fn seed(&self, document: Document) -> Result<(), StoreError> {
        info!("Seeding default {}", document.file_name());
        match document {
            Document::Users => self.write(document, &seed::default_users()).await,
            Document::Vehicles => self.write(document, &seed::default_vehicles()).await,
            Document::Personnel => self.write(document, &seed::default_personnel()).await,
            Document::Incident => self.write(document, &Incident::default()).await,
            Document::Settings => self.write(document, &Settings::default()).await,
            Document::VehicleConfigs => {
                self.write(document, &seed::default_vehicle_configs()).await
            }
            Document::Assignments => self.write(document, &Vec::<SeatAssignment>::new()).await,
        }
    }

    async fn lock(&self, document: Document) -> tokio::sync::MutexGuard<'_, ()> {
        self.inner.locks[document.index()].lock().await
    }

    async fn read_unlocked<T>(&self, document: Document, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.path(document);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Err(e) = self.write_unlocked(document, &default).await {
                    warn!(error = %e, "Could not create missing {}", document.file_name());
                }
                return default;
            }
            Err(e) => {
                warn!(error = %e, "Could not read {}, using default", document.file_name());
                return default;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparsable {}, using default", document.file_name());
                default
            }
        }
    }

    async fn write_unlocked<T: Serialize>(
        &self,
        document: Document,
        value: &T,
    ) -> Result<(), StoreError> {
        let name = document.file_name();
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
            document: name,
            source,
        })?;

        let path = self.path(document);
        let tmp = self.inner.root.join(format!("{name}.tmp"));

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| StoreError::Io {
                document: name,
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Io {
                document: name,
                source,
            })?;

        Ok(())
    }
}
