//! Handler error type and its kind catalog.
//!
//! Handlers raise an [`ErrorKind`] and optionally attach a message for the
//! caller, the resource involved, and debugging context. The resulting
//! [`Error`] serializes through [`ErrorResponse`].

use std::borrow::Cow;
use std::fmt;

use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// A specialized [`Result`] for handler operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// An HTTP error raised by a handler.
///
/// Borrowed string data keeps the common path allocation-free; handlers
/// that format dynamic text pass owned strings instead.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a bare error of the given kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches debugging context, included in the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Replaces the kind's default message with a specific one.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Names the resource the error refers to.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the attached context, if any.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the named resource, if any.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }
        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }
        if let Some(ref resource) = self.resource {
            debug_struct.field("resource", resource);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        write!(f, "{} ({})", response.name, response.status)?;

        if let Some(ref message) = self.message {
            write!(f, ": {message}")?;
        }
        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }
        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }
        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Every failure category the handlers can answer with.
///
/// Each variant maps to one canned [`ErrorResponse`], so status codes and
/// wire names live in a single place.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 - request body or query parameters were rejected.
    BadRequest,
    /// 400 - a required path parameter was absent.
    MissingPathParam,
    /// 401 - no token accompanied the request.
    MissingAuthToken,
    /// 401 - the token was present but unreadable or expired.
    MalformedAuthToken,
    /// 401 - credentials did not match any active account.
    Unauthorized,
    /// 403 - the caller is known but not allowed to do this.
    Forbidden,
    /// 404 - no active resource under that identifier.
    NotFound,
    /// 409 - the request contradicts current resource state.
    Conflict,
    /// 500 - something inside the service failed.
    InternalServerError,
}

impl ErrorKind {
    /// Wraps this kind in a bare [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Shorthand for `into_error().with_context(..)`.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Shorthand for `into_error().with_message(..)`.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Shorthand for `into_error().with_resource(..)`.
    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// The canned response template for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    const ALL_KINDS: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::MissingPathParam,
        ErrorKind::MissingAuthToken,
        ErrorKind::MalformedAuthToken,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
    ];

    #[test]
    fn builder_preserves_every_field() {
        let error = ErrorKind::NotFound
            .with_message("Parcel was not found")
            .with_resource("parcel")
            .with_context("id 0191");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Parcel was not found"));
        assert_eq!(error.resource(), Some("parcel"));
        assert_eq!(error.context(), Some("id 0191"));
    }

    #[test]
    fn display_includes_name_status_and_details() {
        let rendered = ErrorKind::Conflict
            .with_message("Parcel is frozen")
            .with_context("delivered")
            .to_string();

        assert!(rendered.contains("conflict"));
        assert!(rendered.contains("409"));
        assert!(rendered.contains("Parcel is frozen"));
        assert!(rendered.contains("delivered"));
    }

    #[test]
    fn every_kind_maps_to_an_error_status() {
        for kind in ALL_KINDS {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.as_u16() >= 400, "{kind} is not an error");
        }
    }

    #[test]
    fn auth_kinds_answer_unauthorized() {
        for kind in [
            ErrorKind::MissingAuthToken,
            ErrorKind::MalformedAuthToken,
            ErrorKind::Unauthorized,
        ] {
            assert_eq!(kind.response().status, StatusCode::UNAUTHORIZED);
        }
    }
}
