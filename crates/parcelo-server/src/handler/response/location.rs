//! Location response types.

use jiff::Timestamp;
use parcelo_postgres::model::Location;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned when retrieving a location.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Unique identifier of the location.
    pub location_id: Uuid,

    /// Human-readable name of the location.
    pub display_name: String,

    /// Timestamp when the location was created.
    pub created_at: Timestamp,
    /// Timestamp when the location was last updated.
    pub updated_at: Timestamp,
}

impl LocationResponse {
    /// Creates a new instance of [`LocationResponse`].
    pub fn new(location: Location) -> Self {
        Self {
            location_id: location.id,
            display_name: location.display_name,
            created_at: location.created_at.into(),
            updated_at: location.updated_at.into(),
        }
    }
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self::new(location)
    }
}
