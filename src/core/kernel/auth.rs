use crate::core::config::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, Secret};

/// Header carrying the raw API secret on every request
pub const AUTH_HEADER: &str = "X-Authentication";

/// Authenticator trait for request authentication
///
/// Implementations attach whatever credentials the platform expects. The
/// pipeline calls it once per outgoing request.
pub trait Authenticator: Send + Sync {
    /// Add authentication headers to an outgoing request
    fn apply(&self, headers: &mut HeaderMap);
}

/// Static shared-secret header. No signing, timestamp or nonce is involved.
pub struct SecretHeaderAuth {
    secret: Secret<String>,
    value: HeaderValue,
}

impl SecretHeaderAuth {
    /// Validate the secret once so every request can reuse the header value
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "API secret must not be empty".to_string(),
            ));
        }

        let mut value = HeaderValue::from_str(secret).map_err(|_| {
            ConfigError::InvalidConfiguration(
                "API secret contains characters not allowed in an HTTP header".to_string(),
            )
        })?;
        value.set_sensitive(true);

        Ok(Self {
            secret: Secret::new(secret.to_string()),
            value,
        })
    }

    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for SecretHeaderAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretHeaderAuth")
            .field("header", &AUTH_HEADER)
            .finish_non_exhaustive()
    }
}

impl Authenticator for SecretHeaderAuth {
    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(HeaderName::from_static("x-authentication"), self.value.clone());
    }
}
