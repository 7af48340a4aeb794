//! Crew assignment ("Einteilung"): seats personnel on vehicles by qualification.
//!
//! Vehicles are filled in configuration order and seats in slot order. Each
//! seat takes the best-ranked eligible person still free, so earlier vehicles
//! get first pick. Nobody is seated twice.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{
    CrewConstraints, Person, Qualification, SeatAssignment, Slot, VehicleConfig, VehicleType,
};

const PREFER_SCORE: u32 = 10;
const ADDON_SCORE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatPlan {
    pub position: String,
    pub assigned: Option<Person>,
    pub requires: BTreeSet<Qualification>,
    pub prefer: BTreeSet<Qualification>,
    pub addons_required: BTreeSet<Qualification>,
    pub allow_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehiclePlan {
    pub vehicle_config_id: u64,
    pub vehicle: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub slots: Vec<SeatPlan>,
    /// Every seat is taken.
    pub fulfilled: bool,
    pub constraints_met: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewPlan {
    pub assignments: Vec<VehiclePlan>,
    pub unassigned: Vec<Person>,
    pub total_fulfilled: usize,
    pub total_vehicles: usize,
    pub warnings: Vec<String>,
}

impl CrewPlan {
    fn collect(assignments: Vec<VehiclePlan>, unassigned: Vec<Person>) -> Self {
        let warnings = assignments
            .iter()
            .flat_map(|v| v.warnings.iter().cloned())
            .collect();
        Self {
            total_fulfilled: assignments.iter().filter(|v| v.fulfilled).count(),
            total_vehicles: assignments.len(),
            assignments,
            unassigned,
            warnings,
        }
    }

    /// The plan as seats to persist. Empty seats are not stored.
    #[must_use]
    pub fn seats(&self) -> Vec<SeatAssignment> {
        self.assignments
            .iter()
            .flat_map(|vehicle| {
                vehicle.slots.iter().filter_map(|seat| {
                    seat.assigned.as_ref().map(|person| SeatAssignment {
                        vehicle_config_id: vehicle.vehicle_config_id,
                        position: seat.position.clone(),
                        person_id: person.id,
                    })
                })
            })
            .collect()
    }
}

fn eligible(person: &Person, slot: &Slot) -> bool {
    let holds_all = |set: &BTreeSet<Qualification>| set.iter().all(|q| person.holds(*q));

    holds_all(&slot.requires)
        && (slot.requires_any.is_empty() || slot.requires_any.iter().any(|q| person.holds(*q)))
        && (slot.allow_fallback || holds_all(&slot.addons_required))
}

fn score(person: &Person, slot: &Slot) -> u32 {
    let held = |set: &BTreeSet<Qualification>| {
        u32::try_from(set.iter().filter(|q| person.holds(**q)).count()).unwrap_or(u32::MAX)
    };
    held(&slot.prefer) * PREFER_SCORE + held(&slot.addons_required) * ADDON_SCORE
}

/// Angriffstrupp and Wassertrupp seats, by full name or as ATF/ATM/WTF/WTM.
fn is_water_trupp(position: &str) -> bool {
    let position = position.to_lowercase();
    position.contains("wassertrupp")
        || position.contains("angriffstrupp")
        || position.starts_with("wt")
        || position.starts_with("at")
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn check_constraints(vehicle: &str, c: &CrewConstraints, seats: &[SeatPlan]) -> Vec<String> {
    let seated: Vec<&Person> = seats.iter().filter_map(|s| s.assigned.as_ref()).collect();
    let holding = |q: Qualification| count(seated.iter().filter(|p| p.holds(q)).count());

    let mut warnings = Vec::new();
    let mut check_total = |minimum: Option<u32>, qualification: Qualification| {
        if let Some(minimum) = minimum {
            let have = holding(qualification);
            if have < minimum {
                warnings.push(format!(
                    "Nicht genug {qualification}: {have}/{minimum} ({vehicle})"
                ));
            }
        }
    };

    check_total(c.min_agt_total, Qualification::Agt);
    check_total(c.min_maschinist_total, Qualification::Maschinist);
    check_total(c.min_gf_total, Qualification::Gf);
    check_total(c.min_funk_total, Qualification::Sprechfunker);

    if let Some(minimum) = c.min_agt_watertrupp {
        let have = count(
            seats
                .iter()
                .filter(|s| is_water_trupp(&s.position))
                .filter(|s| s.assigned.as_ref().is_some_and(|p| p.holds(Qualification::Agt)))
                .count(),
        );
        if have < minimum {
            warnings.push(format!("Nicht genug AGT im Wassertrupp: {have}/{minimum}"));
        }
    }

    warnings
}

fn seat(slot: &Slot, assigned: Option<Person>) -> SeatPlan {
    SeatPlan {
        position: slot.position.clone(),
        assigned,
        requires: slot.requires.clone(),
        prefer: slot.prefer.clone(),
        addons_required: slot.addons_required.clone(),
        allow_fallback: slot.allow_fallback,
    }
}

fn vehicle_plan(config: &VehicleConfig, slots: Vec<SeatPlan>) -> VehiclePlan {
    let warnings = check_constraints(&config.vehicle, &config.constraints, &slots);
    VehiclePlan {
        vehicle_config_id: config.id,
        vehicle: config.vehicle.clone(),
        vehicle_type: config.vehicle_type,
        fulfilled: slots.iter().all(|s| s.assigned.is_some()),
        constraints_met: warnings.is_empty(),
        warnings,
        slots,
    }
}

/// Seats `personnel` on `configs`, greedily and in order.
///
/// Ties in rank go to whoever comes first in `personnel`.
#[must_use]
pub fn assign(personnel: &[Person], configs: &[VehicleConfig]) -> CrewPlan {
    let mut free: Vec<&Person> = personnel.iter().collect();

    let assignments = configs
        .iter()
        .map(|config| {
            let slots = config
                .slots
                .iter()
                .map(|slot| {
                    let best = free
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| eligible(p, slot))
                        // max_by_key keeps the last maximum; reverse to keep the first
                        .rev()
                        .max_by_key(|(_, p)| score(p, slot))
                        .map(|(index, _)| index);
                    seat(slot, best.map(|index| free.remove(index).clone()))
                })
                .collect();
            vehicle_plan(config, slots)
        })
        .collect();

    CrewPlan::collect(assignments, free.into_iter().cloned().collect())
}

/// Rebuilds a plan from saved seats against the current configs and personnel.
///
/// Seats whose vehicle config, position or person no longer exists are dropped.
#[must_use]
pub fn from_saved(
    personnel: &[Person],
    configs: &[VehicleConfig],
    saved: &[SeatAssignment],
) -> CrewPlan {
    let by_id: HashMap<u64, &Person> = personnel.iter().map(|p| (p.id, p)).collect();
    let by_seat: HashMap<(u64, &str), u64> = saved
        .iter()
        .map(|s| ((s.vehicle_config_id, s.position.as_str()), s.person_id))
        .collect();

    let mut seated = HashSet::new();
    let assignments = configs
        .iter()
        .map(|config| {
            let slots = config
                .slots
                .iter()
                .map(|slot| {
                    let person = by_seat
                        .get(&(config.id, slot.position.as_str()))
                        .and_then(|id| by_id.get(id))
                        .filter(|p| seated.insert(p.id))
                        .map(|p| (*p).clone());
                    seat(slot, person)
                })
                .collect();
            vehicle_plan(config, slots)
        })
        .collect();

    let unassigned = personnel
        .iter()
        .filter(|p| !seated.contains(&p.id))
        .cloned()
        .collect();
    CrewPlan::collect(assignments, unassigned)
}
