//! Request and response bodies for the Plaid endpoints we call.
//!
//! Only the fields this app uses are modelled. Request bodies borrow the
//! credentials from [crate::PlaidConfig] so secrets are exposed only for the
//! duration of serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The Plaid products requested when creating a link token.
pub const PRODUCTS: [&str; 1] = ["transactions"];

/// The language Plaid Link is displayed in.
pub const LANGUAGE: &str = "en";

/// The countries whose institutions are offered in Plaid Link.
pub const COUNTRY_CODES: [&str; 1] = ["US"];

/// Restrict Plaid Link to checking and savings accounts, and credit accounts.
pub fn default_account_filters() -> Value {
    json!({
        "depository": { "account_subtypes": ["checking", "savings"] },
        "credit": {},
    })
}

/// The end user a link token is created for.
#[derive(Debug, Serialize)]
pub struct LinkTokenUser<'a> {
    /// A stable identifier for the user in this app.
    pub client_user_id: &'a str,
}

/// The body of `POST /link/token/create`.
#[derive(Serialize)]
pub struct LinkTokenCreateRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub client_name: &'a str,
    pub user: LinkTokenUser<'a>,
    pub language: &'a str,
    pub country_codes: &'a [&'a str],
    pub products: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_filters: Option<Value>,
}

/// The response from `POST /link/token/create`.
///
/// This is also the response sent to the app, unchanged. Optional fields are
/// always sent, as `null` when Plaid did not provide them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTokenResponse {
    /// The token used to open Plaid Link on the device.
    pub link_token: String,
    /// When the link token expires, as an ISO 8601 timestamp.
    #[serde(default)]
    pub expiration: Option<String>,
    /// Plaid's identifier for the request, useful when contacting support.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// The body of `POST /item/public_token/exchange`.
#[derive(Serialize)]
pub struct PublicTokenExchangeRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub public_token: &'a str,
}

/// The response from `POST /item/public_token/exchange`.
///
/// Plaid also sends `item_id` and `request_id`, which are not kept.
/// Not `Debug` since it holds the access token in the clear.
#[derive(Deserialize)]
pub struct PublicTokenExchangeResponse {
    pub access_token: String,
}

/// The body of `POST /transactions/get`.
#[derive(Serialize)]
pub struct TransactionsGetRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub access_token: &'a str,
    /// The first date to fetch, `YYYY-MM-DD`.
    pub start_date: String,
    /// The last date to fetch, `YYYY-MM-DD`.
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// The `options` object for `POST /transactions/get`.
pub fn transactions_options(count: u32) -> Value {
    json!({ "count": count })
}

/// A transaction as returned by Plaid, limited to the fields we use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaidTransaction {
    /// The merchant or description of the transaction.
    pub name: String,
    /// Positive for money leaving the account, negative for money entering it.
    pub amount: f64,
    /// The posted date, `YYYY-MM-DD`.
    pub date: String,
    /// The cleaned-up merchant name, if Plaid could determine one.
    #[serde(default)]
    pub merchant_name: Option<String>,
    /// The Plaid account the transaction belongs to.
    pub account_id: String,
}

/// The response from `POST /transactions/get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsGetResponse {
    /// The transactions in the requested window, at most `count` of them.
    pub transactions: Vec<PlaidTransaction>,
    /// Plaid's identifier for the request.
    #[serde(default)]
    pub request_id: Option<String>,
}
