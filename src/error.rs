//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The synthetic upstream status used when Plaid does not answer in time.
pub const UPSTREAM_TIMEOUT_STATUS: u16 = 504;

/// The synthetic upstream status used when Plaid could not be reached or the
/// response could not be read.
pub const UPSTREAM_UNREACHABLE_STATUS: u16 = 502;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a request that is structurally invalid, e.g. a missing
    /// public token.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Plaid responded with a non-2xx status, or could not be reached at all.
    ///
    /// `body` is the response text from Plaid, which never contains our
    /// credentials. For transport failures `status` is one of
    /// [UPSTREAM_TIMEOUT_STATUS] or [UPSTREAM_UNREACHABLE_STATUS] and `body`
    /// describes the failure.
    #[error("Plaid error {status}: {body}")]
    Upstream {
        /// The HTTP status code from Plaid.
        status: u16,
        /// The response body from Plaid.
        body: String,
    },

    /// Plaid responded with a success status but the body did not match the
    /// expected shape.
    ///
    /// This indicates a contract violation and is only described in the
    /// server logs. The client receives a generic internal server error.
    #[error("could not decode the Plaid response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Build an [Error::Upstream] from a transport failure in the HTTP client.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        let status = if error.is_timeout() {
            UPSTREAM_TIMEOUT_STATUS
        } else {
            UPSTREAM_UNREACHABLE_STATUS
        };

        let body = if error.is_timeout() {
            "timed out waiting for Plaid".to_owned()
        } else if error.is_connect() {
            "could not connect to Plaid".to_owned()
        } else {
            format!("request to Plaid failed: {}", error.without_url())
        };

        Self::Upstream { status, body }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Error::Upstream { status, body } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("Plaid error {status}"),
                    "upstream_status": status,
                    "details": body,
                }),
            ),
            // Already logged by the Plaid client where the path is known.
            Error::MalformedResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
