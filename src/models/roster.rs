use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::Qualification;

/// Records with a collection-unique numeric id.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Next id for a collection: one past the largest id still present, or 1 when empty.
///
/// Never `len + 1`: after a deletion in the middle that would collide with a survivor.
/// `None` once the largest id is `u64::MAX`; ids are never wrapped back to the start.
pub fn next_id<T: Identified>(items: &[T]) -> Option<u64> {
    items
        .iter()
        .map(|item| item.id())
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    #[serde(rename = "funk", default)]
    pub radio_call_sign: String,
    #[serde(rename = "besatzung", default)]
    pub crew_capacity: u32,
}

impl Identified for Vehicle {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A brigade member ("Kamerad").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(rename = "qualifikationen", default)]
    pub qualifications: BTreeSet<Qualification>,
}

impl Person {
    #[must_use]
    pub fn holds(&self, qualification: Qualification) -> bool {
        self.qualifications.contains(&qualification)
    }
}

impl Identified for Person {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    #[serde(rename = "funk", default)]
    pub radio_call_sign: String,
    #[serde(rename = "besatzung", default, deserialize_with = "lenient_count")]
    pub crew_capacity: u32,
}

/// A count as clients send it: a number or a numeric string. Anything else is 0,
/// the same as an unparsable form field.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub name: String,
    #[serde(rename = "qualifikationen", default)]
    pub qualifications: BTreeSet<Qualification>,
}
