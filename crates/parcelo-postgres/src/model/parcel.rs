//! Parcel delivery order model for PostgreSQL database operations.
//!
//! ## Models
//!
//! - [`Parcel`] - Main parcel model with routing and status information
//! - [`NewParcel`] - Data structure for creating new parcels
//! - [`UpdateParcel`] - Data structure for updating existing parcels

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::parcels;
use crate::types::ParcelStatus;

/// Main parcel model representing a delivery order in the system.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = parcels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Parcel {
    /// Unique parcel identifier.
    pub id: Uuid,
    /// User who created and owns this delivery order.
    pub owner_id: Uuid,
    /// Human-readable description of the parcel contents.
    pub description: String,
    /// Parcel weight in kilograms (strictly positive).
    pub weight_kg: f64,
    /// Address the parcel is collected from.
    pub pickup_address: String,
    /// Address the parcel is delivered to.
    pub destination_address: String,
    /// Last known location, if one has been recorded.
    pub current_location_id: Option<Uuid>,
    /// Current delivery status.
    pub status: ParcelStatus,
    /// Timestamp when the parcel was created.
    pub created_at: Timestamp,
    /// Timestamp when the parcel was last updated.
    pub updated_at: Timestamp,
    /// Timestamp when the parcel was soft-deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Data for creating a new parcel.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = parcels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewParcel {
    /// User who creates and owns this delivery order.
    pub owner_id: Uuid,
    /// Human-readable description of the parcel contents.
    pub description: String,
    /// Parcel weight in kilograms.
    pub weight_kg: f64,
    /// Address the parcel is collected from.
    pub pickup_address: String,
    /// Address the parcel is delivered to.
    pub destination_address: String,
    /// Initial location, if known.
    pub current_location_id: Option<Uuid>,
}

/// Data for updating a parcel.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = parcels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateParcel {
    /// Human-readable description of the parcel contents.
    pub description: Option<String>,
    /// Parcel weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Address the parcel is collected from.
    pub pickup_address: Option<String>,
    /// Address the parcel is delivered to.
    pub destination_address: Option<String>,
    /// Last known location.
    pub current_location_id: Option<Uuid>,
    /// Current delivery status.
    pub status: Option<ParcelStatus>,
}

impl Parcel {
    /// Returns whether the parcel has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns whether the given user owns this parcel.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Returns whether the parcel can still be modified.
    ///
    /// Parcels in a terminal status (delivered or cancelled) are frozen.
    pub fn is_mutable(&self) -> bool {
        !self.is_deleted() && self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parcel(status: ParcelStatus) -> Parcel {
        let now = jiff::Timestamp::now();
        Parcel {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            description: "Books".to_owned(),
            weight_kg: 2.5,
            pickup_address: "12 Harbor St".to_owned(),
            destination_address: "7 Hill Rd".to_owned(),
            current_location_id: None,
            status,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    #[test]
    fn terminal_parcels_are_frozen() {
        assert!(sample_parcel(ParcelStatus::Pending).is_mutable());
        assert!(sample_parcel(ParcelStatus::InTransit).is_mutable());
        assert!(!sample_parcel(ParcelStatus::Delivered).is_mutable());
        assert!(!sample_parcel(ParcelStatus::Cancelled).is_mutable());
    }

    #[test]
    fn ownership_check() {
        let parcel = sample_parcel(ParcelStatus::Pending);
        assert!(parcel.is_owned_by(parcel.owner_id));
        assert!(!parcel.is_owned_by(Uuid::new_v4()));
    }
}
