use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Wrapper around [`axum::extract::Path`] whose rejection is an [`Error`].
///
/// Every path segment this service captures is a UUID identifier, so the
/// rejection mapping points callers at the expected UUID format instead of
/// echoing serde internals.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Creates a new instance of [`Path`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner path parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => ErrorKind::BadRequest
                .with_message("Identifier in the request path is not a valid UUID")
                .with_context("expected xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"),
            PathRejection::MissingPathParams(err) => {
                ErrorKind::MissingPathParam.with_context(err.to_string())
            }
            _ => ErrorKind::InternalServerError
                .with_context("path parameters did not match the route definition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_wrapper_roundtrip() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(Path::new(id).into_inner(), id);
    }
}
