use sha2::{Digest, Sha256};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Reasons a request fails bearer authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header must be provided with Bearer token")]
    MissingOrMalformedHeader,

    #[error("ADAPTER_API_KEY not configured on server")]
    ServerMisconfigured,

    #[error("Invalid API key")]
    InvalidToken,
}

/// Checks `Authorization` headers against the single shared secret.
///
/// Only the SHA-256 digest of the secret is kept; incoming tokens are hashed
/// the same way and compared without early exit.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    secret_digest: Option<[u8; 32]>,
}

impl ApiKeyAuthenticator {
    pub fn new(secret: &str) -> Self {
        let secret_digest = if secret.is_empty() {
            None
        } else {
            Some(digest(secret))
        };
        Self { secret_digest }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_digest.is_some()
    }

    /// Validate the raw header value. `None` means the header was absent.
    pub fn authenticate(&self, header: Option<&str>) -> Result<(), AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingOrMalformedHeader)?;

        let expected = self.secret_digest.as_ref().ok_or(AuthError::ServerMisconfigured)?;

        if digests_match(&digest(token), expected) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("configured", &self.is_configured())
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
