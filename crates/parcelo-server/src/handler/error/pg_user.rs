//! User-related constraint violation error handlers.

use parcelo_postgres::types::UserConstraints;

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::UsernameNotEmpty => {
                ErrorKind::BadRequest.with_message("Username cannot be empty")
            }
            UserConstraints::UsernameLengthMax => {
                ErrorKind::BadRequest.with_message("Username is too long")
            }
            UserConstraints::EmailFormat => {
                ErrorKind::BadRequest.with_message("Invalid email format")
            }
            UserConstraints::EmailLengthMax => {
                ErrorKind::BadRequest.with_message("Email address is too long")
            }
            UserConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_message("Password cannot be empty")
            }
            UserConstraints::UpdatedAfterCreated | UserConstraints::DeletedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
            UserConstraints::UsernameUnique => {
                ErrorKind::Conflict.with_message("A user with this username already exists")
            }
            UserConstraints::EmailAddressUnique => {
                ErrorKind::Conflict.with_message("A user with this email address already exists")
            }
        };

        error.with_resource("user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_constraints_map_to_conflict() {
        let error: Error<'static> = UserConstraints::EmailAddressUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("user"));

        let error: Error<'static> = UserConstraints::UsernameUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn check_constraints_map_to_bad_request() {
        let error: Error<'static> = UserConstraints::EmailFormat.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
