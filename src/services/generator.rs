//! Synthetic personnel for demos and drills.

use rand::Rng;
use std::collections::BTreeSet;

use crate::models::{Person, Qualification};

pub const FIRST_NAMES: [&str; 20] = [
    "Max", "Anna", "Felix", "Laura", "Uwe", "Marco", "Sebastian", "Lisa", "Markus", "Nina",
    "Timo", "Kevin", "Julia", "Tom", "Sarah", "Jonas", "Miriam", "Kai", "Sven", "Lea",
];

pub const SURNAMES: [&str; 20] = [
    "Müller", "Schmidt", "Meier", "Schulz", "Fischer", "Weber", "Wagner", "Becker", "Hoffmann",
    "Keller", "König", "Krause", "Brandt", "Jäger", "Vogel", "Berg", "Arnold", "Lorenz", "Roth",
    "Pohl",
];

/// Each tag is drawn independently, in this order, after TM.
pub const OPTIONAL_QUALIFICATIONS: [(Qualification, f64); 5] = [
    (Qualification::Agt, 0.45),
    (Qualification::Maschinist, 0.25),
    (Qualification::Gf, 0.15),
    (Qualification::Sprechfunker, 0.55),
    (Qualification::San, 0.30),
];

/// Generates `count` persons with ids `1..=count`. Every person holds TM.
pub fn generate_personnel<R: Rng>(rng: &mut R, count: u64) -> Vec<Person> {
    (1..=count)
        .map(|id| {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = SURNAMES[rng.random_range(0..SURNAMES.len())];

            let mut qualifications = BTreeSet::from([Qualification::Tm]);
            for (qualification, probability) in OPTIONAL_QUALIFICATIONS {
                if rng.random_bool(probability) {
                    qualifications.insert(qualification);
                }
            }

            Person {
                id,
                name: format!("{first} {last}"),
                qualifications,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generates_sequential_ids_with_tm() {
        let mut rng = StdRng::seed_from_u64(77);
        let personnel = generate_personnel(&mut rng, 77);

        assert_eq!(personnel.len(), 77);
        for (index, person) in personnel.iter().enumerate() {
            assert_eq!(person.id, index as u64 + 1);
            assert!(person.holds(Qualification::Tm));
        }
    }

    #[test]
    fn test_names_come_from_lists() {
        let mut rng = StdRng::seed_from_u64(1);
        for person in generate_personnel(&mut rng, 50) {
            let (first, last) = person.name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(SURNAMES.contains(&last));
        }
    }

    #[test]
    fn test_same_seed_same_roster() {
        let a = generate_personnel(&mut StdRng::seed_from_u64(42), 10);
        let b = generate_personnel(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_personnel(&mut rng, 0).is_empty());
    }
}
