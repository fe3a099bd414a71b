//! The endpoints the app calls to link a bank account through Plaid.

mod create_link_token;
mod exchange_public_token;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, PlaidClient};

pub use create_link_token::create_link_token_endpoint;
pub use exchange_public_token::{
    ExchangePublicTokenIn, exchange_and_fetch, exchange_public_token_endpoint,
};

/// The state needed by the link endpoints.
#[derive(Debug, Clone)]
pub struct LinkState {
    /// The client used to talk to Plaid.
    pub plaid: Arc<PlaidClient>,
}

impl FromRef<AppState> for LinkState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            plaid: state.plaid.clone(),
        }
    }
}
