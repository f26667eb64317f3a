//! Parcel-related constraint violation error handlers.

use parcelo_postgres::types::ParcelConstraints;

use crate::handler::{Error, ErrorKind};

impl From<ParcelConstraints> for Error<'static> {
    fn from(c: ParcelConstraints) -> Self {
        let error = match c {
            ParcelConstraints::DescriptionNotEmpty => {
                ErrorKind::BadRequest.with_message("Parcel description cannot be empty")
            }
            ParcelConstraints::WeightPositive => {
                ErrorKind::BadRequest.with_message("Parcel weight must be greater than zero")
            }
            ParcelConstraints::PickupAddressNotEmpty => {
                ErrorKind::BadRequest.with_message("Pickup address cannot be empty")
            }
            ParcelConstraints::DestinationAddressNotEmpty => {
                ErrorKind::BadRequest.with_message("Destination address cannot be empty")
            }
            ParcelConstraints::UpdatedAfterCreated | ParcelConstraints::DeletedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("parcel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_check_maps_to_bad_request() {
        let error: Error<'static> = ParcelConstraints::WeightPositive.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("parcel"));
    }
}
