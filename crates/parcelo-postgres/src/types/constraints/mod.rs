//! Database constraint violations organized by table.
//!
//! This module provides an enumeration of all database constraint violations,
//! organized into per-table groups so query-layer errors can be translated
//! into precise API responses (most importantly 409 Conflict for uniqueness).

pub mod locations;
pub mod parcels;
pub mod users;

use std::fmt;

pub use locations::LocationConstraints;
pub use parcels::ParcelConstraints;
use serde::{Deserialize, Serialize};
pub use users::UserConstraints;

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps all specific constraint types, providing a single interface
/// for handling any constraint violation while maintaining type safety and
/// the organizational benefits of the separate modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    /// Constraints of the `users` table.
    User(UserConstraints),
    /// Constraints of the `parcels` table.
    Parcel(ParcelConstraints),
    /// Constraints of the `locations` table.
    Location(LocationConstraints),
}

/// Categories of database constraint violations.
///
/// This enum helps classify constraint violations by their purpose and type,
/// making it easier to handle different categories of errors appropriately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// This method attempts to parse a constraint name string into the
    /// corresponding enum variant. It returns `None` if the constraint name
    /// is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use parcelo_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("users_email_address_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Route based on constraint name prefix to avoid parsing attempts
        // against the wrong table's enum.
        if constraint.starts_with("users_") {
            if let Some(c) = UserConstraints::new(constraint) {
                return Some(ConstraintViolation::User(c));
            }
        } else if constraint.starts_with("parcels_") {
            if let Some(c) = ParcelConstraints::new(constraint) {
                return Some(ConstraintViolation::Parcel(c));
            }
        } else if constraint.starts_with("locations_")
            && let Some(c) = LocationConstraints::new(constraint)
        {
            return Some(ConstraintViolation::Location(c));
        }

        None
    }

    /// Returns the table name associated with this constraint.
    ///
    /// This is useful for categorizing errors by the table they affect.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Parcel(_) => "parcels",
            ConstraintViolation::Location(_) => "locations",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Parcel(c) => c.categorize(),
            ConstraintViolation::Location(c) => c.categorize(),
        }
    }

    /// Returns whether this violation is a uniqueness conflict.
    #[inline]
    pub fn is_unique_violation(&self) -> bool {
        self.constraint_category() == ConstraintCategory::Uniqueness
    }

    /// Returns the conflicting field name for uniqueness violations.
    ///
    /// Used to tell API clients which field caused a 409 response.
    pub fn conflicting_field(&self) -> Option<&'static str> {
        match self {
            ConstraintViolation::User(UserConstraints::UsernameUnique) => Some("username"),
            ConstraintViolation::User(UserConstraints::EmailAddressUnique) => {
                Some("email_address")
            }
            ConstraintViolation::Location(LocationConstraints::DisplayNameUnique) => {
                Some("display_name")
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => c.fmt(f),
            ConstraintViolation::Parcel(c) => c.fmt(f),
            ConstraintViolation::Location(c) => c.fmt(f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or(strum::ParseError::VariantNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_unique_indexes() {
        let violation = ConstraintViolation::new("users_username_unique_idx").unwrap();
        assert_eq!(violation.table_name(), "users");
        assert!(violation.is_unique_violation());
        assert_eq!(violation.conflicting_field(), Some("username"));
    }

    #[test]
    fn recognizes_check_constraints() {
        let violation = ConstraintViolation::new("parcels_weight_positive").unwrap();
        assert_eq!(violation.table_name(), "parcels");
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );
        assert!(!violation.is_unique_violation());
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(ConstraintViolation::new("unknown_constraint").is_none());
        assert!(ConstraintViolation::new("users_unknown_rule").is_none());
    }

    #[test]
    fn string_round_trip() {
        let violation = ConstraintViolation::new("locations_display_name_unique_idx").unwrap();
        let rendered: String = violation.into();
        let parsed = ConstraintViolation::try_from(rendered).unwrap();
        assert_eq!(parsed, violation);
    }
}
