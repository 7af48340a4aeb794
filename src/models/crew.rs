//! Vehicle crew layouts ("Fahrzeugkonfiguration") and saved seat assignments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Identified, Qualification};

/// Vehicle class, used to pick a default seat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    /// Löschfahrzeug, including HLF.
    #[serde(rename = "LF")]
    Lf,
    #[serde(rename = "TLF")]
    Tlf,
    /// Drehleiter.
    #[serde(rename = "DL")]
    Dl,
    #[serde(rename = "RW")]
    Rw,
    #[serde(rename = "MTF")]
    Mtf,
    #[serde(rename = "MTW")]
    Mtw,
    #[serde(rename = "ELW")]
    Elw,
    #[serde(rename = "GW")]
    Gw,
    #[serde(rename = "AB")]
    Ab,
    #[serde(rename = "Sonstiges")]
    Other,
}

impl VehicleType {
    /// Classifies a vehicle by the abbreviations and words in its name.
    ///
    /// Specific classes are tried before general ones, so "HLF 20" is an LF
    /// and "TLF 3000" a TLF, and "MTF" wins over "MTW".
    #[must_use]
    pub fn detect(name: &str) -> Self {
        let name = name.trim().to_uppercase();
        let has = |word: &str| words(&name).any(|(_, w)| w == word);
        let mentions = |part: &str| name.contains(part);

        if has("HLF") {
            Self::Lf
        } else if has("TLF") {
            Self::Tlf
        } else if has("DLK") || mentions("DREHLEITER") || dl_with_suffix(&name) {
            Self::Dl
        } else if has("RW") || mentions("RÜSTWAGEN") || mentions("RUESTWAGEN") {
            Self::Rw
        } else if has("MTF") {
            Self::Mtf
        } else if has("MTW") || mentions("MANNSCHAFTS") {
            Self::Mtw
        } else if has("ELW") || mentions("EINSATZLEIT") {
            Self::Elw
        } else if has("GW") || mentions("GERÄTEWAGEN") || mentions("GERAETEWAGEN") {
            Self::Gw
        } else if has("AB") || mentions("ABROLLBEHÄLTER") || mentions("ABROLLBEHAELTER") {
            Self::Ab
        } else if has("LF") || mentions("LÖSCHFAHRZEUG") || mentions("LOESCHFAHRZEUG") {
            Self::Lf
        } else {
            Self::Other
        }
    }
}

/// ASCII words of `name` with their byte offsets.
fn words(name: &str) -> impl Iterator<Item = (usize, &str)> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    name.char_indices()
        .filter(move |&(i, c)| is_word(c) && !name[..i].ends_with(is_word))
        .map(move |(start, _)| {
            let len = name[start..].find(|c: char| !is_word(c)).unwrap_or(name.len() - start);
            (start, &name[start..start + len])
        })
}

/// "DL" as a word directly followed by whitespace or a dash, as in "DL 23" or "DL-A".
fn dl_with_suffix(name: &str) -> bool {
    words(name).any(|(start, word)| {
        word == "DL"
            && name[start + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '-')
    })
}

fn default_true() -> bool {
    true
}

/// One seat on a vehicle and who may take it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub position: String,
    /// The occupant must hold all of these.
    #[serde(default)]
    pub requires: BTreeSet<Qualification>,
    /// The occupant must hold at least one of these, if any are listed.
    #[serde(default)]
    pub requires_any: BTreeSet<Qualification>,
    /// Ranks candidates; not a requirement.
    #[serde(default)]
    pub prefer: BTreeSet<Qualification>,
    #[serde(default)]
    pub addons_required: BTreeSet<Qualification>,
    /// When false, `addons_required` becomes a hard requirement.
    #[serde(default = "default_true")]
    pub allow_fallback: bool,
}

impl Slot {
    fn open(position: &str) -> Self {
        Self {
            position: position.to_string(),
            requires: BTreeSet::new(),
            requires_any: BTreeSet::new(),
            prefer: BTreeSet::new(),
            addons_required: BTreeSet::new(),
            allow_fallback: true,
        }
    }

    fn requiring(position: &str, qualification: Qualification) -> Self {
        Self {
            requires: [qualification].into_iter().collect(),
            ..Self::open(position)
        }
    }
}

/// Headcount checks over everyone seated on one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_agt_total: Option<u32>,
    /// AGT holders among the Angriffstrupp and Wassertrupp seats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_agt_watertrupp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_maschinist_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gf_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_funk_total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub id: u64,
    /// Name of the vehicle this layout belongs to.
    pub vehicle: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub constraints: CrewConstraints,
}

impl Identified for VehicleConfig {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicleConfig {
    pub vehicle: String,
    /// Detected from the vehicle name when absent.
    #[serde(rename = "type", default)]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub constraints: CrewConstraints,
}

impl NewVehicleConfig {
    /// The stored record under `id`. A missing type is detected from the vehicle name.
    #[must_use]
    pub fn with_id(self, id: u64) -> VehicleConfig {
        VehicleConfig {
            id,
            vehicle_type: self
                .vehicle_type
                .unwrap_or_else(|| VehicleType::detect(&self.vehicle)),
            vehicle: self.vehicle,
            slots: self.slots,
            constraints: self.constraints,
        }
    }

    /// The standard layout for a vehicle of the detected class, or `None` for
    /// classes without one. Those have to be configured by hand.
    #[must_use]
    pub fn standard_for(vehicle: &str) -> Option<Self> {
        use Qualification::{Agt, Gf, Maschinist, Sprechfunker};

        let vehicle_type = VehicleType::detect(vehicle);
        let (slots, constraints) = match vehicle_type {
            VehicleType::Lf | VehicleType::Tlf => (
                vec![
                    Slot::requiring("GF", Gf),
                    Slot::requiring("MA", Maschinist),
                    Slot::requiring("MELDER", Sprechfunker),
                    Slot::requiring("ATF", Agt),
                    Slot::requiring("ATM", Agt),
                    Slot::requiring("WTF", Agt),
                    Slot::requiring("WTM", Agt),
                    Slot::open("STF"),
                    Slot::open("STM"),
                ],
                CrewConstraints {
                    min_agt_total: Some(4),
                    min_funk_total: Some(1),
                    ..CrewConstraints::default()
                },
            ),
            VehicleType::Dl => (
                vec![
                    Slot::requiring("GF", Gf),
                    Slot::requiring("MA", Maschinist),
                    Slot::requiring("MELDER", Sprechfunker),
                ],
                CrewConstraints {
                    min_funk_total: Some(1),
                    ..CrewConstraints::default()
                },
            ),
            VehicleType::Rw => (
                vec![
                    Slot::open("TF"),
                    Slot::requiring("MA", Maschinist),
                    Slot::open("TM"),
                ],
                CrewConstraints::default(),
            ),
            VehicleType::Mtf | VehicleType::Mtw | VehicleType::Elw => (
                ["Fahrer", "Beifahrer", "Platz 3", "Platz 4", "Platz 5", "Platz 6"]
                    .into_iter()
                    .map(Slot::open)
                    .collect(),
                CrewConstraints::default(),
            ),
            VehicleType::Gw | VehicleType::Ab | VehicleType::Other => return None,
        };

        Some(Self {
            vehicle: vehicle.trim().to_string(),
            vehicle_type: Some(vehicle_type),
            slots,
            constraints,
        })
    }
}

/// A saved seat: who currently sits where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub vehicle_config_id: u64,
    pub position: String,
    pub person_id: u64,
}
