pub mod crew_assignment;
pub mod generator;
pub mod readiness;
pub use crew_assignment::CrewPlan;
pub use readiness::ReadinessReport;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::FileAuthService;

pub mod roster_service;
pub mod roster_service_impl;
pub use roster_service::{RosterError, RosterService};
pub use roster_service_impl::FileRosterService;

pub mod settings_service;
pub mod settings_service_impl;
pub use settings_service::{SettingsError, SettingsService};
pub use settings_service_impl::FileSettingsService;

pub mod crew_service;
pub mod crew_service_impl;
pub use crew_service::{CrewError, CrewService, VehicleSeedReport};
pub use crew_service_impl::FileCrewService;
