//! Identifies which app user a request is made on behalf of.

use std::fmt::Display;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::Error;

/// The header the app uses to identify the user when no session layer has
/// already done so.
pub const CLIENT_USER_ID_HEADER: &str = "x-client-user-id";

/// A stable, non-empty identifier for the app user, sent to Plaid as
/// `client_user_id` when creating link tokens.
///
/// Handlers receive it as an extractor. A session layer in front of the
/// router can insert a [ClientUserId] into the request extensions, which takes
/// precedence over the [CLIENT_USER_ID_HEADER] header. The header is not
/// authenticated and is a development fallback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUserId(String);

impl ClientUserId {
    /// Create a client user ID from `id`, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `id` is blank.
    pub fn new(id: &str) -> Result<Self, Error> {
        let id = id.trim();

        if id.is_empty() {
            return Err(Error::Validation(
                "the client user ID must not be empty".to_owned(),
            ));
        }

        Ok(Self(id.to_owned()))
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClientUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<S> FromRequestParts<S> for ClientUserId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(client_user_id) = parts.extensions.get::<ClientUserId>() {
            return Ok(client_user_id.clone());
        }

        let header = parts.headers.get(CLIENT_USER_ID_HEADER).ok_or_else(|| {
            Error::Validation(format!("missing the {CLIENT_USER_ID_HEADER} header"))
        })?;

        let value = header.to_str().map_err(|_| {
            Error::Validation(format!(
                "the {CLIENT_USER_ID_HEADER} header must be visible ASCII"
            ))
        })?;

        ClientUserId::new(value)
    }
}
