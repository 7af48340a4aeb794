//! Staffing readiness ("Besetzungscheck").
//!
//! A pure function of the current personnel, settings and incident. It is
//! recomputed on every view since any of the three can change between requests.

use serde::Serialize;

use crate::models::{Incident, Person, Qualification, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Available {
    pub agt: u64,
    pub maschinist: u64,
    pub gf: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Required {
    pub min_agt: u32,
    pub min_maschinist: u32,
    pub min_gf: u32,
    pub crew_required: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub requirement: &'static str,
    pub available: u64,
    pub required: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    pub available: Available,
    pub required: Required,
    pub fulfilled: bool,
}

impl ReadinessReport {
    /// Requirements that are not met, in check order.
    #[must_use]
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        let a = self.available;
        let r = self.required;

        [
            ("AGT", a.agt, r.min_agt),
            ("Maschinist", a.maschinist, r.min_maschinist),
            ("GF", a.gf, r.min_gf),
            ("Mannschaftsbedarf", a.total, r.crew_required),
        ]
        .into_iter()
        .filter(|(_, available, required)| *available < u64::from(*required))
        .map(|(requirement, available, required)| Shortfall {
            requirement,
            available,
            required,
        })
        .collect()
    }
}

fn headcount(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

fn count_with(personnel: &[Person], qualification: Qualification) -> u64 {
    headcount(personnel.iter().filter(|p| p.holds(qualification)).count())
}

#[must_use]
pub fn evaluate(personnel: &[Person], settings: &Settings, incident: &Incident) -> ReadinessReport {
    let available = Available {
        agt: count_with(personnel, Qualification::Agt),
        maschinist: count_with(personnel, Qualification::Maschinist),
        gf: count_with(personnel, Qualification::Gf),
        total: headcount(personnel.len()),
    };

    let required = Required {
        min_agt: settings.min_agt,
        min_maschinist: settings.min_maschinist,
        min_gf: settings.min_gf,
        crew_required: incident.crew_required,
    };

    let fulfilled = available.agt >= u64::from(required.min_agt)
        && available.maschinist >= u64::from(required.min_maschinist)
        && available.gf >= u64::from(required.min_gf)
        && available.total >= u64::from(required.crew_required);

    ReadinessReport {
        available,
        required,
        fulfilled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn person(id: u64, tags: &[Qualification]) -> Person {
        let mut qualifications: BTreeSet<Qualification> = tags.iter().copied().collect();
        qualifications.insert(Qualification::Tm);
        Person {
            id,
            name: format!("Kamerad {id}"),
            qualifications,
        }
    }

    /// 2 AGT, 1 Maschinist, 1 GF, 9 in total.
    fn full_crew() -> Vec<Person> {
        let mut crew = vec![
            person(1, &[Qualification::Agt]),
            person(2, &[Qualification::Agt]),
            person(3, &[Qualification::Maschinist]),
            person(4, &[Qualification::Gf]),
        ];
        crew.extend((5..=9).map(|id| person(id, &[])));
        crew
    }

    #[test]
    fn test_full_crew_is_ready() {
        let report = evaluate(&full_crew(), &Settings::default(), &Incident::default());

        assert_eq!(
            report.available,
            Available {
                agt: 2,
                maschinist: 1,
                gf: 1,
                total: 9
            }
        );
        assert!(report.fulfilled);
        assert!(report.shortfalls().is_empty());
    }

    #[test]
    fn test_losing_one_agt_fails() {
        let mut crew = full_crew();
        crew[1] = person(2, &[]);

        let report = evaluate(&crew, &Settings::default(), &Incident::default());

        assert_eq!(report.available.agt, 1);
        assert_eq!(report.available.total, 9);
        assert!(!report.fulfilled);
        let shortfalls = report.shortfalls();
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].requirement, "AGT");
    }

    #[test]
    fn test_each_threshold_flips_verdict() {
        let crew = full_crew();
        let settings = Settings::default();
        let incident = Incident::default();
        assert!(evaluate(&crew, &settings, &incident).fulfilled);

        let raised = [
            Settings {
                min_agt: 3,
                ..settings.clone()
            },
            Settings {
                min_maschinist: 2,
                ..settings.clone()
            },
            Settings {
                min_gf: 2,
                ..settings.clone()
            },
        ];
        for s in &raised {
            assert!(!evaluate(&crew, s, &incident).fulfilled, "{s:?}");
        }

        let bigger = Incident {
            crew_required: 10,
            ..incident
        };
        assert!(!evaluate(&crew, &settings, &bigger).fulfilled);
    }

    #[test]
    fn test_zero_thresholds_on_empty_roster() {
        let settings = Settings {
            shift_length_hours: 12,
            min_agt: 0,
            min_maschinist: 0,
            min_gf: 0,
        };
        let incident = Incident {
            crew_required: 0,
            ..Incident::default()
        };

        assert!(evaluate(&[], &settings, &incident).fulfilled);
        assert!(!evaluate(&[], &Settings::default(), &incident).fulfilled);
    }
}
