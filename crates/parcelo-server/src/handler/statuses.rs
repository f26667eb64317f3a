//! Parcel status enumeration handler.
//!
//! Clients use this to populate status filters and pickers without
//! hardcoding the lifecycle on their side.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use parcelo_postgres::types::ParcelStatus;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// A single entry of the status enumeration.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// Wire name of the status.
    pub status: ParcelStatus,
    /// Whether parcels in this status are frozen.
    pub is_terminal: bool,
}

/// Lists all parcel lifecycle statuses.
#[tracing::instrument(skip_all)]
async fn list_statuses() -> Result<(StatusCode, Json<Vec<StatusEntry>>)> {
    let statuses = ParcelStatus::iter()
        .map(|status| StatusEntry {
            status,
            is_terminal: status.is_terminal(),
        })
        .collect();

    Ok((StatusCode::OK, Json(statuses)))
}

/// Returns a [`Router`] with the status enumeration route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/statuses", get(list_statuses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_covers_every_status() {
        let entries: Vec<_> = ParcelStatus::iter().collect();
        assert_eq!(entries.len(), 4);
        assert!(entries.contains(&ParcelStatus::Pending));
        assert!(entries.contains(&ParcelStatus::Delivered));
    }

    #[test]
    fn terminal_flag_matches_lifecycle() {
        assert!(ParcelStatus::Delivered.is_terminal());
        assert!(ParcelStatus::Cancelled.is_terminal());
        assert!(!ParcelStatus::InTransit.is_terminal());
    }
}
