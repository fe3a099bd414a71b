//! An in-process stand-in for the Plaid API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    PlaidConfig, PlaidEnvironment,
    plaid::{LINK_TOKEN_CREATE, PUBLIC_TOKEN_EXCHANGE, PlaidClient, TRANSACTIONS_GET},
};

pub(crate) const TEST_CLIENT_ID: &str = "test-client-id";
pub(crate) const TEST_SECRET: &str = "test-secret-do-not-log";
pub(crate) const TEST_CLIENT_NAME: &str = "Budgetly";

/// A config with the test credentials pointing at `base_url`.
pub(crate) fn test_config(base_url: &str) -> PlaidConfig {
    PlaidConfig::new(
        PlaidEnvironment::Sandbox,
        TEST_CLIENT_ID,
        TEST_SECRET,
        TEST_CLIENT_NAME,
    )
    .with_base_url(base_url)
}

/// A request received by the fake.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    /// The parsed JSON body, or `Value::Null` if it was not JSON.
    pub body: Value,
}

#[derive(Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
}

/// Builder for a fake Plaid server.
///
/// By default every endpoint succeeds: the exchange returns the access token
/// `access-sandbox-abc` and `/transactions/get` returns a single coffee purchase.
#[derive(Clone)]
pub(crate) struct FakePlaid {
    responses: HashMap<String, CannedResponse>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakePlaid {
    pub fn new() -> Self {
        let fake = Self {
            responses: HashMap::new(),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        fake.respond(
            LINK_TOKEN_CREATE,
            StatusCode::OK,
            json!({
                "link_token": "link-sandbox-abc",
                "expiration": "2024-01-02T03:04:05Z",
                "request_id": "req-link",
            }),
        )
        .respond(
            PUBLIC_TOKEN_EXCHANGE,
            StatusCode::OK,
            json!({
                "access_token": "access-sandbox-abc",
                "item_id": "item-1",
                "request_id": "req-exchange",
            }),
        )
        .respond(
            TRANSACTIONS_GET,
            StatusCode::OK,
            json!({
                "accounts": [],
                "transactions": [{
                    "name": "Coffee",
                    "amount": 4.5,
                    "date": "2024-01-02",
                    "merchant_name": null,
                    "account_id": "a1",
                    "pending": false,
                    "category": ["Food and Drink", "Coffee Shop"],
                }],
                "total_transactions": 1,
                "request_id": "req-transactions",
            }),
        )
    }

    /// Answer requests to `path` with `status` and the JSON `body`.
    pub fn respond(self, path: &str, status: StatusCode, body: Value) -> Self {
        self.respond_raw(path, status, &body.to_string())
    }

    /// Answer requests to `path` with `status` and the literal `body`.
    pub fn respond_raw(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.responses.insert(
            path.to_owned(),
            CannedResponse {
                status,
                body: body.to_owned(),
            },
        );
        self
    }

    /// Wait `delay` before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Start serving on an ephemeral local port.
    pub async fn spawn(self) -> RunningFakePlaid {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake Plaid listener");
        let address = listener
            .local_addr()
            .expect("Could not get fake Plaid address");
        let requests = self.requests.clone();
        let app = Router::new().fallback(handle_request).with_state(self);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake Plaid server failed");
        });

        RunningFakePlaid {
            base_url: format!("http://{address}"),
            requests,
        }
    }
}

async fn handle_request(
    State(fake): State<FakePlaid>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();

    fake.requests
        .lock()
        .expect("Could not lock recorded requests")
        .push(RecordedRequest {
            path: path.clone(),
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });

    if let Some(delay) = fake.delay {
        tokio::time::sleep(delay).await;
    }

    match fake.responses.get(&path) {
        Some(canned) => (
            canned.status,
            [(CONTENT_TYPE, "application/json")],
            canned.body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            json!({ "error_type": "INVALID_REQUEST", "error_code": "NOT_FOUND" }).to_string(),
        )
            .into_response(),
    }
}

/// A fake Plaid server that is accepting requests.
pub(crate) struct RunningFakePlaid {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RunningFakePlaid {
    /// A client with the test credentials that talks to this fake.
    pub fn client(&self) -> PlaidClient {
        PlaidClient::new(test_config(&self.base_url)).expect("Could not create Plaid client")
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("Could not lock recorded requests")
            .clone()
    }

    /// The requests received so far for `path`, in order.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}
