//! Known location model for PostgreSQL database operations.
//!
//! Locations form the controlled vocabulary that parcel tracking updates
//! reference from `parcels.current_location_id`.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::locations;

/// A named location parcels can be tracked against.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Location {
    /// Unique location identifier.
    pub id: Uuid,
    /// Human-readable location name (unique, case-insensitive).
    pub display_name: String,
    /// Timestamp when the location was created.
    pub created_at: Timestamp,
    /// Timestamp when the location was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new location.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewLocation {
    /// Human-readable location name.
    pub display_name: String,
}

/// Data for updating a location.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateLocation {
    /// Human-readable location name.
    pub display_name: Option<String>,
}
