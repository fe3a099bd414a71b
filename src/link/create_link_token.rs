//! Issues link tokens for opening Plaid Link on the device.

use axum::{Json, extract::State};

use crate::{Error, link::LinkState, plaid::LinkTokenResponse, session::ClientUserId};

/// Create a Plaid link token for the requesting user.
///
/// The request has no body. The user comes from [ClientUserId]: a session
/// layer should insert it into the request extensions. Without one, the
/// unauthenticated `x-client-user-id` header is used, which lets any caller
/// choose the Plaid `client_user_id` and is only meant for development.
///
/// The response is Plaid's link token response, unchanged. Plaid errors are
/// returned as a bad request carrying Plaid's status and message.
pub async fn create_link_token_endpoint(
    State(state): State<LinkState>,
    client_user_id: ClientUserId,
) -> Result<Json<LinkTokenResponse>, Error> {
    let response = state.plaid.create_link_token(client_user_id.as_str()).await?;
    tracing::info!("Created a link token for user {client_user_id}");

    Ok(Json(response))
}
