//! Axum extractor that deserialises and validates url-encoded forms

use crate::error::ReviewError;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest},
    http::Request,
};
use hashbrown::HashSet;
use serde::de::DeserializeOwned;
use validator::Validate;

/// An axum extractor that reads the body as url-encoded form data and validates it using the
/// validator crate.
///
/// The body is parsed as a form whatever its `Content-Type`. See [from_first_values] for how
/// repeated and blank fields are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Bytes: FromRequest<S, B, Rejection = BytesRejection>,
    B: Send + 'static,
{
    type Rejection = ReviewError;

    /// Extract a `ValidatedForm` from a `Request`.
    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        let value: T = from_first_values(&body)?;
        value.validate()?;
        Ok(ValidatedForm(value))
    }
}

/// Deserialise url-encoded data, keeping only the first non-blank value of each field.
///
/// Fields with an empty value are dropped, so they deserialise as absent.
pub fn from_first_values<T: DeserializeOwned>(input: &[u8]) -> Result<T, ReviewError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(input)?;
    let mut seen = HashSet::new();
    let first: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .filter(|(key, _)| seen.insert(key.clone()))
        .collect();
    let encoded = serde_urlencoded::to_string(&first).map_err(|err| ReviewError::Internal {
        message: err.to_string(),
    })?;
    Ok(serde_urlencoded::from_str(&encoded)?)
}
