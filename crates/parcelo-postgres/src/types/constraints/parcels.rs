//! Parcels table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Parcels table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ParcelConstraints {
    // Parcel validation constraints
    #[strum(serialize = "parcels_description_not_empty")]
    DescriptionNotEmpty,
    #[strum(serialize = "parcels_weight_positive")]
    WeightPositive,
    #[strum(serialize = "parcels_pickup_address_not_empty")]
    PickupAddressNotEmpty,
    #[strum(serialize = "parcels_destination_address_not_empty")]
    DestinationAddressNotEmpty,

    // Parcel chronological constraints
    #[strum(serialize = "parcels_updated_after_created")]
    UpdatedAfterCreated,
    #[strum(serialize = "parcels_deleted_after_created")]
    DeletedAfterCreated,
}

impl ParcelConstraints {
    /// Creates a new [`ParcelConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ParcelConstraints::DescriptionNotEmpty
            | ParcelConstraints::WeightPositive
            | ParcelConstraints::PickupAddressNotEmpty
            | ParcelConstraints::DestinationAddressNotEmpty => ConstraintCategory::Validation,

            ParcelConstraints::UpdatedAfterCreated | ParcelConstraints::DeletedAfterCreated => {
                ConstraintCategory::Chronological
            }
        }
    }
}

impl From<ParcelConstraints> for String {
    #[inline]
    fn from(val: ParcelConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ParcelConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
