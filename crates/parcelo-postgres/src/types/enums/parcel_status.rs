//! Parcel status enumeration for delivery lifecycle tracking.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the current status of a parcel in its delivery lifecycle.
///
/// This enumeration corresponds to the `PARCEL_STATUS` PostgreSQL enum. The
/// set of labels is fixed: parcels reference a status, they never own one.
/// Terminal states accept no further transitions.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ParcelStatus"]
pub enum ParcelStatus {
    /// Parcel has been registered but not yet picked up.
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[strum(serialize = "pending")]
    #[default]
    Pending,

    /// Parcel is on its way to the destination.
    #[db_rename = "in_transit"]
    #[serde(rename = "in_transit")]
    #[strum(serialize = "in_transit")]
    InTransit,

    /// Parcel arrived at its destination.
    #[db_rename = "delivered"]
    #[serde(rename = "delivered")]
    #[strum(serialize = "delivered")]
    Delivered,

    /// Delivery was cancelled before completion.
    #[db_rename = "cancelled"]
    #[serde(rename = "cancelled")]
    #[strum(serialize = "cancelled")]
    Cancelled,
}

impl ParcelStatus {
    /// Returns whether this status is terminal (no further transitions allowed).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParcelStatus::Delivered | ParcelStatus::Cancelled)
    }

    /// Returns whether the parcel is still moving through the delivery pipeline.
    #[inline]
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Returns whether a transition to `next` is permitted from this status.
    ///
    /// Any non-terminal status may move to any other status; terminal
    /// statuses are frozen.
    #[inline]
    pub fn can_transition_to(self, next: ParcelStatus) -> bool {
        self.is_active() && self != next
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn string_round_trip() {
        for status in ParcelStatus::iter() {
            let rendered = status.to_string();
            let parsed: ParcelStatus = rendered.parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn terminal_states_are_frozen() {
        assert!(!ParcelStatus::Delivered.can_transition_to(ParcelStatus::Pending));
        assert!(!ParcelStatus::Cancelled.can_transition_to(ParcelStatus::InTransit));
    }

    #[test]
    fn active_states_may_move() {
        assert!(ParcelStatus::Pending.can_transition_to(ParcelStatus::InTransit));
        assert!(ParcelStatus::InTransit.can_transition_to(ParcelStatus::Delivered));
        assert!(ParcelStatus::Pending.can_transition_to(ParcelStatus::Cancelled));
    }

    #[test]
    fn no_self_transition() {
        assert!(!ParcelStatus::Pending.can_transition_to(ParcelStatus::Pending));
    }
}
