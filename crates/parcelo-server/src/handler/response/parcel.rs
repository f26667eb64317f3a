//! Parcel response types.

use jiff::Timestamp;
use parcelo_postgres::model::Parcel;
use parcelo_postgres::types::ParcelStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned when retrieving a parcel.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelResponse {
    /// Unique identifier of the parcel.
    pub parcel_id: Uuid,
    /// Identifier of the user who registered the parcel.
    pub owner_id: Uuid,

    /// Free-form description of the contents.
    pub description: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Address the parcel is collected from.
    pub pickup_address: String,
    /// Address the parcel is delivered to.
    pub destination_address: String,
    /// Last recorded location, if any.
    pub current_location_id: Option<Uuid>,
    /// Current delivery lifecycle status.
    pub status: ParcelStatus,

    /// Timestamp when the parcel was registered.
    pub created_at: Timestamp,
    /// Timestamp when the parcel was last updated.
    pub updated_at: Timestamp,
}

impl ParcelResponse {
    /// Creates a new instance of [`ParcelResponse`].
    pub fn new(parcel: Parcel) -> Self {
        Self {
            parcel_id: parcel.id,
            owner_id: parcel.owner_id,
            description: parcel.description,
            weight_kg: parcel.weight_kg,
            pickup_address: parcel.pickup_address,
            destination_address: parcel.destination_address,
            current_location_id: parcel.current_location_id,
            status: parcel.status,
            created_at: parcel.created_at.into(),
            updated_at: parcel.updated_at.into(),
        }
    }
}

impl From<Parcel> for ParcelResponse {
    fn from(parcel: Parcel) -> Self {
        Self::new(parcel)
    }
}

/// Response returned after soft-deleting a parcel.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParcelResponse {
    /// Unique identifier of the deleted parcel.
    pub parcel_id: Uuid,

    /// Timestamp when the parcel was originally registered.
    pub created_at: Timestamp,
    /// Timestamp when the parcel was deleted.
    pub deleted_at: Option<Timestamp>,
}

impl DeleteParcelResponse {
    /// Creates a new instance of [`DeleteParcelResponse`].
    pub fn new(parcel: Parcel) -> Self {
        Self {
            parcel_id: parcel.id,
            created_at: parcel.created_at.into(),
            deleted_at: parcel.deleted_at.map(Into::into),
        }
    }
}

impl From<Parcel> for DeleteParcelResponse {
    fn from(parcel: Parcel) -> Self {
        Self::new(parcel)
    }
}
