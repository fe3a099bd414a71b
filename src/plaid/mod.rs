//! Outbound access to the Plaid API.

mod client;
mod models;

pub use client::{DEFAULT_TRANSACTION_COUNT, PlaidClient};
#[cfg(test)]
pub(crate) use client::{LINK_TOKEN_CREATE, PUBLIC_TOKEN_EXCHANGE, TRANSACTIONS_GET};
pub use models::{LinkTokenResponse, PlaidTransaction, TransactionsGetResponse};
