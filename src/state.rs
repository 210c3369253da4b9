use std::sync::Arc;

use crate::auth::ApiKeyAuthenticator;
use crate::config::AdapterConfig;
use crate::database::{AppStore, DatabaseError};
use crate::error::ApiError;

/// Shared, read-only request context handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<ApiKeyAuthenticator>,
    pub store: Arc<dyn AppStore>,
    pub redact_internal_errors: bool,
}

impl AppState {
    pub fn new(authenticator: ApiKeyAuthenticator, store: Arc<dyn AppStore>) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            store,
            redact_internal_errors: false,
        }
    }

    pub fn from_config(config: &AdapterConfig, store: Arc<dyn AppStore>) -> Self {
        Self::new(ApiKeyAuthenticator::new(&config.security.api_key), store)
            .with_redaction(config.security.redact_internal_errors)
    }

    pub fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_internal_errors = redact;
        self
    }

    pub fn database_error(&self, err: DatabaseError) -> ApiError {
        ApiError::from_database(err, self.redact_internal_errors)
    }
}
