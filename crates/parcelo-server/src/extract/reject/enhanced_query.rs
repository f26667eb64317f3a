use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Wrapper around [`axum::extract::Query`] whose rejection is an [`Error`].
///
/// List endpoints take their filters and pagination through this extractor.
/// All filter fields are optional, so the only client mistake it reports is
/// a value that does not parse, such as `?status=bogus` or `?page=abc`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Creates a new [`Query`] wrapper around the provided query parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes the wrapper and returns the inner query parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(query_error(rejection)),
        }
    }
}

fn query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: "parcelo_server::extract::query",
        error = %rejection,
        "Rejected query string"
    );

    let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
        return ErrorKind::BadRequest.with_message("Query string could not be parsed");
    };

    let detail = err.to_string();
    match offending_field(&detail) {
        Some(field) => ErrorKind::BadRequest
            .with_message("Query parameter has an invalid value")
            .with_context(format!("parameter '{field}' could not be parsed")),
        None => ErrorKind::BadRequest
            .with_message("Query parameter has an invalid value")
            .with_context(detail),
    }
}

/// Pulls the field name out of a serde_urlencoded message when it names one.
fn offending_field(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once('`')?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_pulled_from_backticks() {
        assert_eq!(offending_field("missing field `status`"), Some("status"));
        assert_eq!(offending_field("no field named here"), None);
    }

    #[test]
    fn query_wrapper_roundtrip() {
        let query = Query::new("page=2".to_string());
        assert_eq!(query.into_inner(), "page=2");
    }
}
