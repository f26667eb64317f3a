//! Locations table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Locations table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum LocationConstraints {
    // Location validation constraints
    #[strum(serialize = "locations_display_name_not_empty")]
    DisplayNameNotEmpty,
    #[strum(serialize = "locations_display_name_length_max")]
    DisplayNameLengthMax,

    // Location chronological constraints
    #[strum(serialize = "locations_updated_after_created")]
    UpdatedAfterCreated,

    // Location unique constraints
    #[strum(serialize = "locations_display_name_unique_idx")]
    DisplayNameUnique,
}

impl LocationConstraints {
    /// Creates a new [`LocationConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            LocationConstraints::DisplayNameNotEmpty
            | LocationConstraints::DisplayNameLengthMax => ConstraintCategory::Validation,

            LocationConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,

            LocationConstraints::DisplayNameUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<LocationConstraints> for String {
    #[inline]
    fn from(val: LocationConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for LocationConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
