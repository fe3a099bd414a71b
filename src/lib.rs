//! Budgetly proxy is the backend for the Budgetly mobile app.
//!
//! It sits between the app and Plaid: it issues link tokens, exchanges the
//! public token from Plaid Link for an access token, and returns a simplified
//! list of recent transactions. Plaid credentials and access tokens never
//! leave the server.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod date_window;
pub mod endpoints;
mod error;
mod link;
mod logging;
mod plaid;
mod routing;
mod session;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{DEFAULT_UPSTREAM_TIMEOUT, PlaidConfig, PlaidEnvironment};
pub use date_window::{DateWindow, LOOKBACK_DAYS, format_plaid_date};
pub use error::{Error, UPSTREAM_TIMEOUT_STATUS, UPSTREAM_UNREACHABLE_STATUS};
pub use link::{
    ExchangePublicTokenIn, LinkState, create_link_token_endpoint, exchange_and_fetch,
    exchange_public_token_endpoint,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use plaid::{
    DEFAULT_TRANSACTION_COUNT, LinkTokenResponse, PlaidClient, PlaidTransaction,
    TransactionsGetResponse,
};
pub use routing::build_router;
pub use session::{CLIENT_USER_ID_HEADER, ClientUserId};
pub use transaction::{TransactionOut, TransactionsOut, map_transactions};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
