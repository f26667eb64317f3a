//! Health monitoring response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response returned by the health endpoint.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Whether the service and its database are reachable.
    pub is_healthy: bool,
    /// Timestamp when the check was performed.
    pub updated_at: Timestamp,
}
