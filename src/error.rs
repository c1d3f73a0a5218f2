use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Failures on the way from a requested URL to a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid URL")]
    MissingUrl,
    #[error("Error accessing URL: {0}")]
    Access(#[from] reqwest::Error),
    #[error("Invalid URL")]
    Status(u16),
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Every failure is reported to the caller as a bad request.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody { message: self.to_string() })).into_response()
    }
}
