//! Error handling.

use axum::{
    extract::rejection::BytesRejection,
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{event, Level};

use crate::query::DateBound;

/// Review service error type
///
/// This type encapsulates the errors that may occur while handling a request.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// A date filter could not be parsed as `YYYY-MM-DD`
    #[error("Invalid {bound} format. Use YYYY-MM-DD")]
    InvalidDate { bound: DateBound },

    /// Error reading the request body
    #[error(transparent)]
    RequestBody(#[from] BytesRejection),

    /// Error deserialising a query string or form body
    #[error("failed to parse url-encoded data")]
    UrlEncoded(#[from] serde_urlencoded::de::Error),

    /// A submitted review failed validation
    #[error("Missing 'Location' or 'ReviewBody'")]
    SubmissionInvalid(#[from] validator::ValidationErrors),

    /// Error serialising a response body
    #[error("failed to serialise response")]
    Serialisation(#[from] serde_json::Error),

    /// Unexpected fault while handling a request
    #[error("{message}")]
    Internal { message: String },
}

impl IntoResponse for ReviewError {
    /// Convert from a `ReviewError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Errors raised while bulk loading reviews at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The reviews file could not be opened
    #[error("failed to open reviews file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row of the reviews file could not be parsed
    #[error("malformed review record in {}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A response to send in error cases
///
/// The body is a JSON object with a single `error` message.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Error message
    error: String,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred. Its display form becomes the message.
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status,
            error: error.to_string(),
        }
    }

    /// Return a 400 bad request ErrorResponse
    fn bad_request<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<ReviewError> for ErrorResponse {
    /// Convert from a `ReviewError` into an `ErrorResponse`.
    fn from(error: ReviewError) -> Self {
        let response = match &error {
            // Bad request
            ReviewError::InvalidDate { bound: _ }
            | ReviewError::RequestBody(_)
            | ReviewError::UrlEncoded(_)
            | ReviewError::SubmissionInvalid(_) => Self::bad_request(&error),

            // Internal server error
            ReviewError::Serialisation(_) | ReviewError::Internal { message: _ } => {
                Self::internal_server_error(&error)
            }
        };

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source.to_string());
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}
