use serde::{Deserialize, Serialize};

/// The active incident ("Einsatz"). Singleton, overwritten as a whole on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    #[serde(rename = "stichwort")]
    pub keyword: String,

    #[serde(rename = "bemerkung")]
    pub remark: String,

    /// Required headcount for the incident.
    #[serde(rename = "mannschaftsbedarf")]
    pub crew_required: u32,
}

impl Default for Incident {
    fn default() -> Self {
        Self {
            keyword: "B: Kleinbrand".to_string(),
            remark: String::new(),
            crew_required: 9,
        }
    }
}

/// Staffing minimums and shift configuration. Singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "schichtlaenge_std")]
    pub shift_length_hours: u32,

    pub min_agt: u32,

    pub min_maschinist: u32,

    pub min_gf: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shift_length_hours: 12,
            min_agt: 2,
            min_maschinist: 1,
            min_gf: 1,
        }
    }
}
