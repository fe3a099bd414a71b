//! Exchanges a public token from Plaid Link and returns the last 30 days of
//! transactions for the newly linked item.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    date_window::DateWindow,
    link::LinkState,
    plaid::{DEFAULT_TRANSACTION_COUNT, PlaidClient},
    transaction::{TransactionsOut, map_transactions},
};

/// The request body for the exchange endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangePublicTokenIn {
    /// The public token produced by Plaid Link on the device.
    pub public_token: Option<String>,
}

/// Exchange the public token in the request body for an access token, then
/// fetch the transactions in the last 30 days.
///
/// The access token is used for this request only. It is never logged or
/// returned to the app.
///
/// A missing or blank public token is rejected before Plaid is called. The
/// token is otherwise forwarded exactly as sent. If
/// either Plaid call fails the whole request fails and no transactions are
/// returned.
pub async fn exchange_public_token_endpoint(
    State(state): State<LinkState>,
    payload: Result<Json<ExchangePublicTokenIn>, JsonRejection>,
) -> Result<Json<TransactionsOut>, Error> {
    let Json(payload) = payload.map_err(|rejection| Error::Validation(rejection.body_text()))?;

    let public_token = match payload.public_token.as_deref() {
        Some(token) if !token.trim().is_empty() => token,
        Some(_) => {
            return Err(Error::Validation(
                "public_token must not be empty".to_owned(),
            ));
        }
        None => {
            return Err(Error::Validation(
                "missing the field public_token".to_owned(),
            ));
        }
    };

    exchange_and_fetch(&state.plaid, public_token, DateWindow::last_30_days())
        .await
        .map(Json)
}

/// Exchange `public_token` for an access token and fetch up to
/// [DEFAULT_TRANSACTION_COUNT] transactions dated within `window`.
///
/// The transactions are only requested once the exchange has succeeded.
///
/// # Errors
/// Returns the first error from either Plaid call, unmodified.
pub async fn exchange_and_fetch(
    plaid: &PlaidClient,
    public_token: &str,
    window: DateWindow,
) -> Result<TransactionsOut, Error> {
    let access_token = plaid.exchange_public_token(public_token).await?;

    let response = plaid
        .get_transactions(&access_token, &window, DEFAULT_TRANSACTION_COUNT)
        .await?;

    tracing::info!(
        "Fetched {} transactions from {window}",
        response.transactions.len()
    );

    Ok(TransactionsOut {
        transactions: map_transactions(response.transactions),
    })
}
