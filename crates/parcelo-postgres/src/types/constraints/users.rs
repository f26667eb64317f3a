//! Users table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    // User validation constraints
    #[strum(serialize = "users_username_not_empty")]
    UsernameNotEmpty,
    #[strum(serialize = "users_username_length_max")]
    UsernameLengthMax,
    #[strum(serialize = "users_email_format")]
    EmailFormat,
    #[strum(serialize = "users_email_length_max")]
    EmailLengthMax,
    #[strum(serialize = "users_password_hash_not_empty")]
    PasswordHashNotEmpty,

    // User chronological constraints
    #[strum(serialize = "users_updated_after_created")]
    UpdatedAfterCreated,
    #[strum(serialize = "users_deleted_after_created")]
    DeletedAfterCreated,

    // User unique constraints
    #[strum(serialize = "users_username_unique_idx")]
    UsernameUnique,
    #[strum(serialize = "users_email_address_unique_idx")]
    EmailAddressUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserConstraints::UsernameNotEmpty
            | UserConstraints::UsernameLengthMax
            | UserConstraints::EmailFormat
            | UserConstraints::EmailLengthMax
            | UserConstraints::PasswordHashNotEmpty => ConstraintCategory::Validation,

            UserConstraints::UpdatedAfterCreated | UserConstraints::DeletedAfterCreated => {
                ConstraintCategory::Chronological
            }

            UserConstraints::UsernameUnique | UserConstraints::EmailAddressUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
