//! User role enumeration for role-based access control.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the role a user holds across the entire system.
///
/// This enumeration corresponds to the `USER_ROLE` PostgreSQL enum. The role
/// stored in the database is authoritative for authorization decisions: the
/// access-control gate always re-reads it instead of trusting the role claim
/// embedded in a previously issued token.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
    /// Regular user: may manage only their own parcels.
    #[db_rename = "user"]
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    #[default]
    User,

    /// Courier: transports parcels; same API permissions as a regular user.
    #[db_rename = "courier"]
    #[serde(rename = "courier")]
    #[strum(serialize = "courier")]
    Courier,

    /// Administrator: full access to all users and parcels.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
}

impl UserRole {
    /// Returns whether this role grants administrative privileges.
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Returns whether this role marks the user as a courier.
    #[inline]
    pub fn is_courier(self) -> bool {
        matches!(self, UserRole::Courier)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn string_round_trip() {
        for role in UserRole::iter() {
            let rendered = role.to_string();
            let parsed: UserRole = rendered.parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn serde_matches_db_rename() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let parsed: UserRole = serde_json::from_str("\"courier\"").unwrap();
        assert_eq!(parsed, UserRole::Courier);
    }

    #[test]
    fn admin_predicate() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Courier.is_admin());
        assert!(!UserRole::User.is_admin());
    }
}
