//! Implements a struct that holds the state of the REST server.

use std::{path::PathBuf, sync::Arc};

use crate::PlaidClient;

/// The state of the REST server.
///
/// Everything in here is immutable after startup, so clones can be handed to
/// concurrent requests freely.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client used to talk to Plaid.
    pub plaid: Arc<PlaidClient>,

    /// The directory served under `/static`.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState] that serves static files from `public_dir`.
    pub fn new(plaid: PlaidClient, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            plaid: Arc::new(plaid),
            public_dir: public_dir.into(),
        }
    }
}
