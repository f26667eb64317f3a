//! Parcel request types.

use parcelo_postgres::model::UpdateParcel as UpdateParcelModel;
use parcelo_postgres::types::ParcelStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload to register a new parcel.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateParcelRequest {
    /// Human-readable description of the contents (1-500 characters).
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    /// Weight in kilograms, must be greater than zero.
    #[validate(range(exclusive_min = 0.0, max = 10_000.0))]
    pub weight_kg: f64,

    /// Address the parcel is collected from.
    #[validate(length(min = 1, max = 500))]
    pub pickup_address: String,

    /// Address the parcel is delivered to.
    #[validate(length(min = 1, max = 500))]
    pub destination_address: String,
}

/// Request payload to update parcel details.
///
/// All fields are optional; absent fields keep their current values.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParcelRequest {
    /// New description of the contents.
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    /// New weight in kilograms.
    #[validate(range(exclusive_min = 0.0, max = 10_000.0))]
    pub weight_kg: Option<f64>,

    /// New pickup address.
    #[validate(length(min = 1, max = 500))]
    pub pickup_address: Option<String>,

    /// New destination address.
    #[validate(length(min = 1, max = 500))]
    pub destination_address: Option<String>,
}

impl UpdateParcelRequest {
    /// Returns whether the request carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.weight_kg.is_none()
            && self.pickup_address.is_none()
            && self.destination_address.is_none()
    }

    /// Converts this request into a database changeset.
    pub fn into_model(self) -> UpdateParcelModel {
        UpdateParcelModel {
            description: self.description,
            weight_kg: self.weight_kg,
            pickup_address: self.pickup_address,
            destination_address: self.destination_address,
            ..Default::default()
        }
    }
}

/// Request payload to advance a parcel's tracking state.
///
/// Either field may be submitted alone: a status transition, a location
/// scan, or both in one request.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParcelStatusRequest {
    /// Tracking status to transition to, if it changes.
    pub status: Option<ParcelStatus>,

    /// Facility the parcel was last scanned at.
    pub current_location_id: Option<Uuid>,
}

impl UpdateParcelStatusRequest {
    /// Returns whether the payload carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.current_location_id.is_none()
    }
}

/// Query parameters for listing parcels.
///
/// Pagination is extracted separately via [`PaginationRequest`].
///
/// [`PaginationRequest`]: super::PaginationRequest
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParcelsParams {
    /// Restricts results to parcels in this tracking status.
    pub status: Option<ParcelStatus>,
}

/// Query parameters for deleting a parcel.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParcelParams {
    /// Permanently removes the record instead of soft-deleting it.
    ///
    /// Only administrators may request permanent deletion.
    pub permanent: Option<bool>,
}

impl DeleteParcelParams {
    /// Returns whether a permanent deletion was requested.
    pub fn is_permanent(&self) -> bool {
        self.permanent.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_request() -> CreateParcelRequest {
        CreateParcelRequest {
            description: "Books".to_owned(),
            weight_kg: 2.5,
            pickup_address: "1 Origin Way".to_owned(),
            destination_address: "2 Target Street".to_owned(),
        }
    }

    #[test]
    fn create_accepts_valid_payload() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn create_rejects_zero_weight() {
        let mut request = valid_create_request();
        request.weight_kg = 0.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_rejects_negative_weight() {
        let mut request = valid_create_request();
        request.weight_kg = -1.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_detects_empty_payload() {
        assert!(UpdateParcelRequest::default().is_empty());

        let request = UpdateParcelRequest {
            description: Some("Vinyl records".to_owned()),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }

    #[test]
    fn update_changeset_never_touches_status() {
        let request = UpdateParcelRequest {
            description: Some("Vinyl records".to_owned()),
            weight_kg: Some(3.2),
            ..Default::default()
        };

        let model = request.into_model();
        assert!(model.status.is_none());
        assert!(model.current_location_id.is_none());
    }

    #[test]
    fn status_update_accepts_location_only_payload() {
        let request: UpdateParcelStatusRequest =
            serde_json::from_str(r#"{"currentLocationId":"00000000-0000-0000-0000-000000000001"}"#)
                .unwrap();
        assert!(request.status.is_none());
        assert!(request.current_location_id.is_some());
        assert!(!request.is_empty());
    }

    #[test]
    fn status_update_detects_empty_payload() {
        let request: UpdateParcelStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn list_params_deserialize_status_filter() {
        let params: ListParcelsParams = serde_json::from_str(r#"{"status":"in_transit"}"#).unwrap();
        assert_eq!(params.status, Some(ParcelStatus::InTransit));
    }

    #[test]
    fn delete_params_default_to_soft() {
        assert!(!DeleteParcelParams::default().is_permanent());
    }
}
