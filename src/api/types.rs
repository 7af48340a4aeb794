use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub id: u64,
    /// `false` if no record had that id; nothing was written then.
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub generated: usize,
}

#[derive(Debug, Serialize)]
pub struct VehicleSeedResult {
    pub created: usize,
    pub skipped: usize,
    pub message: String,
}

/// Layouts to fill, by id and in this order. All layouts when absent or empty.
#[derive(Debug, Default, Deserialize)]
pub struct CrewAssignmentRequest {
    #[serde(rename = "vehicleIds", default)]
    pub vehicle_config_ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize)]
pub struct QualificationDto {
    pub tag: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub started_at: String,
    pub vehicles: usize,
    pub kameraden: usize,
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}
