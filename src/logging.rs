//! Middleware for logging requests and responses.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::endpoints;

/// Bodies longer than this many characters are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// JSON fields whose values are replaced with [REDACTED] before logging.
const REDACTED_FIELDS: [&str; 3] = ["public_token", "access_token", "secret"];

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// Token values in bodies that parse as JSON are redacted, whatever their
/// content type.
///
/// Request bodies are read up to axum's body limit (2 MB unless a
/// `DefaultBodyLimit` layer says otherwise). Larger requests are rejected with
/// `413 Payload Too Large` before reaching a handler. Responses from
/// [endpoints::STATIC] are streamed without being logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let skip_response_body = parts.uri.path().starts_with(endpoints::STATIC);

    let body_bytes =
        match Bytes::from_request(Request::from_parts(parts.clone(), body), &()).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                tracing::warn!("Could not read request body: {}", rejection.body_text());
                return (
                    rejection.status(),
                    Json(json!({ "error": rejection.body_text() })),
                )
                    .into_response();
            }
        };

    log_request(&parts, &redact_body(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    if skip_response_body {
        let (parts, body) = response.into_parts();
        tracing::info!("Sending response: {parts:#?}\nbody: <static file>");
        return Response::from_parts(parts, body);
    }

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(&parts, &redact_body(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// The body as text for logging, with token values redacted if it is JSON.
fn redact_body(body: &[u8]) -> String {
    redact_json(&String::from_utf8_lossy(body))
}

/// Replace the values of token fields in the JSON document `body`.
///
/// Bodies that are not valid JSON are returned unchanged.
fn redact_json(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            redact_value(&mut value);
            value.to_string()
        }
        Err(_) => body.to_owned(),
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_owned());
                } else {
                    redact_value(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {}
    }
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None` if it is short enough.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {headers:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {headers:#?}\nbody: {body:?}"),
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {headers:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {headers:#?}\nbody: {body:?}"),
    }
}
