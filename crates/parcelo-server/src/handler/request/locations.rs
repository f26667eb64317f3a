//! Location request types.

use parcelo_postgres::model::NewLocation;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload to register a new tracking location.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    /// Human-readable facility name (1-128 characters, unique).
    #[validate(length(min = 1, max = 128))]
    pub display_name: String,
}

impl CreateLocationRequest {
    /// Converts this request into a database model.
    pub fn into_model(self) -> NewLocation {
        NewLocation {
            display_name: self.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_name() {
        let request = CreateLocationRequest {
            display_name: "Hub North".to_owned(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let request = CreateLocationRequest {
            display_name: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_overlong_name() {
        let request = CreateLocationRequest {
            display_name: "x".repeat(129),
        };
        assert!(request.validate().is_err());
    }
}
