//! Location-related constraint violation error handlers.

use parcelo_postgres::types::LocationConstraints;

use crate::handler::{Error, ErrorKind};

impl From<LocationConstraints> for Error<'static> {
    fn from(c: LocationConstraints) -> Self {
        let error = match c {
            LocationConstraints::DisplayNameNotEmpty => {
                ErrorKind::BadRequest.with_message("Location name cannot be empty")
            }
            LocationConstraints::DisplayNameLengthMax => {
                ErrorKind::BadRequest.with_message("Location name is too long")
            }
            LocationConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
            LocationConstraints::DisplayNameUnique => {
                ErrorKind::Conflict.with_message("A location with this name already exists")
            }
        };

        error.with_resource("location")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let error: Error<'static> = LocationConstraints::DisplayNameUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("location"));
    }
}
