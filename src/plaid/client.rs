//! The HTTP client for the Plaid API.

use std::time::Instant;

use axum::http::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error, PlaidConfig,
    config::PlaidEnvironment,
    date_window::DateWindow,
    plaid::models::{
        COUNTRY_CODES, LANGUAGE, LinkTokenCreateRequest, LinkTokenResponse, LinkTokenUser,
        PRODUCTS, PublicTokenExchangeRequest, PublicTokenExchangeResponse,
        TransactionsGetRequest, TransactionsGetResponse, default_account_filters,
        transactions_options,
    },
};

/// The Plaid path for creating link tokens.
pub(crate) const LINK_TOKEN_CREATE: &str = "/link/token/create";
/// The Plaid path for exchanging a public token for an access token.
pub(crate) const PUBLIC_TOKEN_EXCHANGE: &str = "/item/public_token/exchange";
/// The Plaid path for fetching transactions.
pub(crate) const TRANSACTIONS_GET: &str = "/transactions/get";

/// The number of transactions requested when the caller does not specify one.
pub const DEFAULT_TRANSACTION_COUNT: u32 = 25;

/// Sends authenticated requests to Plaid and normalizes the responses.
///
/// The client holds no per-request state and can be shared between
/// concurrent requests behind an `Arc`.
#[derive(Debug)]
pub struct PlaidClient {
    http: reqwest::Client,
    config: PlaidConfig,
}

impl PlaidClient {
    /// Create a client from `config`.
    ///
    /// Every request is bounded by `config.timeout`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be initialized,
    /// e.g. if the TLS backend is unavailable.
    pub fn new(config: PlaidConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, config })
    }

    /// The Plaid tier requests are sent to.
    pub fn environment(&self) -> PlaidEnvironment {
        self.config.environment
    }

    /// The URL prefix requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Create a link token for the user identified by `client_user_id`.
    ///
    /// The token is limited to the transactions product for US institutions,
    /// with checking, savings and credit accounts.
    ///
    /// # Errors
    /// Returns [Error::Upstream] if Plaid rejects the request or cannot be
    /// reached, and [Error::MalformedResponse] if the response cannot be decoded.
    pub async fn create_link_token(
        &self,
        client_user_id: &str,
    ) -> Result<LinkTokenResponse, Error> {
        let request = LinkTokenCreateRequest {
            client_id: &self.config.client_id,
            secret: self.config.secret.expose_secret(),
            client_name: &self.config.client_name,
            user: LinkTokenUser { client_user_id },
            language: LANGUAGE,
            country_codes: &COUNTRY_CODES,
            products: &PRODUCTS,
            account_filters: Some(default_account_filters()),
        };

        self.post(LINK_TOKEN_CREATE, &request).await
    }

    /// Exchange a public token from Plaid Link for an access token.
    ///
    /// Only the access token is returned, the item ID in the response is discarded.
    ///
    /// # Errors
    /// Returns [Error::Upstream] if Plaid rejects the token or cannot be
    /// reached, and [Error::MalformedResponse] if the response cannot be decoded.
    pub async fn exchange_public_token(&self, public_token: &str) -> Result<SecretString, Error> {
        let request = PublicTokenExchangeRequest {
            client_id: &self.config.client_id,
            secret: self.config.secret.expose_secret(),
            public_token,
        };

        let response: PublicTokenExchangeResponse =
            self.post(PUBLIC_TOKEN_EXCHANGE, &request).await?;

        Ok(SecretString::from(response.access_token))
    }

    /// Fetch up to `count` transactions dated within `window` for the item
    /// that `access_token` grants access to.
    ///
    /// # Errors
    /// Returns [Error::Upstream] if Plaid rejects the request or cannot be
    /// reached, and [Error::MalformedResponse] if the response cannot be decoded.
    pub async fn get_transactions(
        &self,
        access_token: &SecretString,
        window: &DateWindow,
        count: u32,
    ) -> Result<TransactionsGetResponse, Error> {
        let request = TransactionsGetRequest {
            client_id: &self.config.client_id,
            secret: self.config.secret.expose_secret(),
            access_token: access_token.expose_secret(),
            start_date: window.start_string(),
            end_date: window.end_string(),
            options: Some(transactions_options(count)),
        };

        self.post(TRANSACTIONS_GET, &request).await
    }

    /// POST `body` as JSON to the Plaid endpoint `path` and decode the response as `R`.
    ///
    /// Non-2xx responses are logged with their status and body. The request
    /// body is never logged since it holds credentials.
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|error| {
                tracing::error!("Request to Plaid {path} failed: {error}");
                Error::from_transport(error)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|error| {
            tracing::error!("Could not read Plaid response from {path}: {error}");
            Error::from_transport(error)
        })?;

        tracing::debug!(
            "Plaid {path} responded with {status} in {:?}",
            started.elapsed()
        );

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::error!(status = status.as_u16(), %body, "Plaid error on {path}");

            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice(&bytes).map_err(|error| {
            tracing::error!("Could not decode Plaid response from {path}: {error}");
            Error::MalformedResponse(error.to_string())
        })
    }
}
