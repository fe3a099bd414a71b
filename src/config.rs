//! Plaid credentials and endpoint selection, read once at startup.

use std::{fmt::Display, time::Duration};

use secrecy::{ExposeSecret, SecretString};

/// The default time to wait for Plaid to respond to a single request.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// The Plaid environment tier that requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaidEnvironment {
    /// Test credentials and fake institutions.
    #[default]
    Sandbox,
    /// Real institutions with a limited number of items.
    Development,
    /// Live data.
    Production,
}

impl PlaidEnvironment {
    /// Parse a tier name, ignoring case.
    ///
    /// Unrecognised names fall back to [PlaidEnvironment::Sandbox] with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "sandbox" => Self::Sandbox,
            "development" => Self::Development,
            "production" => Self::Production,
            other => {
                tracing::warn!("Unknown Plaid environment \"{other}\", using sandbox.");
                Self::Sandbox
            }
        }
    }

    /// The base URL of the Plaid API for this tier.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }

    /// The lowercase tier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl Display for PlaidEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to talk to Plaid.
///
/// Built once in `main` and moved into [crate::PlaidClient]; request handlers
/// never read the process environment.
#[derive(Debug)]
pub struct PlaidConfig {
    /// The tier the base URL was derived from.
    pub environment: PlaidEnvironment,
    /// The URL prefix for every Plaid endpoint, without a trailing slash.
    pub base_url: String,
    /// The Plaid client ID.
    pub client_id: String,
    /// The Plaid secret for `environment`.
    pub secret: SecretString,
    /// The app name shown to users in Plaid Link.
    pub client_name: String,
    /// The maximum time to wait for a single Plaid request.
    pub timeout: Duration,
}

impl PlaidConfig {
    /// Create a config for `environment` with the default timeout.
    pub fn new(
        environment: PlaidEnvironment,
        client_id: impl Into<String>,
        secret: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            base_url: environment.base_url().to_owned(),
            client_id: client_id.into(),
            secret: SecretString::from(secret.into()),
            client_name: client_name.into(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    /// Send requests to `base_url` instead of the tier's default, e.g. a local test double.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether either credential is blank.
    ///
    /// Blank credentials are allowed so the server can start, Plaid will
    /// reject the first request instead.
    pub fn is_missing_credentials(&self) -> bool {
        self.client_id.is_empty() || self.secret.expose_secret().is_empty()
    }
}
