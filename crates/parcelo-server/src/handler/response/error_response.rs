use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body sent for every failed request.
///
/// The `name` is a stable machine-readable identifier and `message` is safe
/// to show to end users. `status` travels as the HTTP status line, never in
/// the body.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Stable identifier of the failure category.
    pub name: Cow<'a, str>,
    /// Human-readable explanation, safe for clients.
    pub message: Cow<'a, str>,
    /// Resource the failure refers to, when a handler names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Extra debugging detail, when a handler attaches it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status, carried out of band.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    pub const FORBIDDEN: Self = Self::new(
        "forbidden",
        "You don't have permission to access this resource",
        StatusCode::FORBIDDEN,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "The authentication token format is invalid",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Authentication is required to access this resource",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Invalid request: missing required parameters",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Invalid or expired authentication credentials",
        StatusCode::UNAUTHORIZED,
    );

    /// Creates a response template from borrowed parts.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Names the resource involved, joining with `/` when one is already set.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let added = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{existing}/{added}")),
            None => added,
        });
        self
    }

    /// Replaces the canned message with a handler-specific one.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches debugging detail, joining with `;` when some is already set.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let added = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{existing}; {added}")),
            None => added,
        });
        self
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_messages_replace_the_template() {
        let response = ErrorResponse::CONFLICT.with_message("Parcel is frozen");
        assert_eq!(&response.message, "Parcel is frozen");
        assert_eq!(response.status, StatusCode::CONFLICT);
    }

    #[test]
    fn repeated_resources_are_joined() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("parcel")
            .with_resource("location");
        assert_eq!(response.resource.as_deref(), Some("parcel/location"));
    }

    #[test]
    fn repeated_context_is_joined() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("pool exhausted")
            .with_context("after 30s");
        assert_eq!(response.context.as_deref(), Some("pool exhausted; after 30s"));
    }

    #[test]
    fn status_never_leaks_into_the_body() {
        let response = ErrorResponse::BAD_REQUEST
            .with_resource("parcel")
            .with_context("weight");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"name\""));
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"resource\""));
        assert!(json.contains("\"context\""));
        assert!(!json.contains("\"status\""));
    }
}
