use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Qualification tags a Kamerad can hold. The vocabulary is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualification {
    /// Truppmann, the base qualification every member holds.
    #[serde(rename = "TM")]
    Tm,
    /// Atemschutzgeräteträger (breathing apparatus).
    #[serde(rename = "AGT")]
    Agt,
    Maschinist,
    /// Gruppenführer (group leader).
    #[serde(rename = "GF")]
    Gf,
    Sprechfunker,
    San,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown qualification: {0}")]
pub struct UnknownQualification(pub String);

impl Qualification {
    /// Vocabulary in the order it is presented to users.
    pub const ALL: [Self; 6] = [
        Self::Tm,
        Self::Agt,
        Self::Maschinist,
        Self::Gf,
        Self::Sprechfunker,
        Self::San,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tm => "TM",
            Self::Agt => "AGT",
            Self::Maschinist => "Maschinist",
            Self::Gf => "GF",
            Self::Sprechfunker => "Sprechfunker",
            Self::San => "San",
        }
    }
}

// Ordered by tag text so sets of tags serialize sorted lexicographically.
impl Ord for Qualification {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Qualification {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Qualification {
    type Err = UnknownQualification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownQualification(s.to_string()))
    }
}
