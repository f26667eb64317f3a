//! JSON body extractor that rejects with the service error type.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Largest request body the JSON extractor will accept, in bytes.
const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Cap on how much of an upstream parser message is echoed back to the caller.
const MAX_DETAIL_CHARS: usize = 200;

/// Wrapper around [`axum::Json`] whose rejection is an [`Error`].
///
/// Handlers take `Json<T>` for request bodies and return it for responses;
/// a body that fails to parse surfaces as a 400 in the same error envelope
/// every other failure uses.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Creates a new [`Json`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Request body does not match the expected shape")
                .with_context(truncate_detail(&err.to_string())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Request body is not well-formed JSON")
                .with_context(truncate_detail(&err.to_string())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Set the Content-Type header to application/json"),
            JsonRejection::BytesRejection(err) if err.to_string().contains("length limit") => {
                ErrorKind::BadRequest
                    .with_message("Request body is too large")
                    .with_context(format!("bodies are capped at {MAX_JSON_PAYLOAD_SIZE} bytes"))
            }
            JsonRejection::BytesRejection(err) => ErrorKind::BadRequest
                .with_message("Request body could not be read")
                .with_context(truncate_detail(&err.to_string())),
            other => ErrorKind::InternalServerError
                .with_context(truncate_detail(&other.to_string())),
        }
    }
}

/// Keeps upstream parser output to a single bounded line.
fn truncate_detail(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or_default();
    first_line.chars().take(MAX_DETAIL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wrapper_roundtrip() {
        let json = Json::new(42_u32);
        assert_eq!(json.into_inner(), 42);
    }

    #[test]
    fn detail_is_bounded_to_one_line() {
        let multiline = format!("{}\nsecond line", "x".repeat(500));
        let detail = truncate_detail(&multiline);
        assert_eq!(detail.len(), MAX_DETAIL_CHARS);
        assert!(!detail.contains('\n'));
    }
}
