use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://trade.mudrex.com/fapi/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct MudrexConfig {
    pub api_secret: Secret<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    pub requests_per_second: f64,
    /// Overrides the default `mudrex-rs/<version>` user agent
    pub user_agent: Option<String>,
}

// Custom Serialize implementation - never expose the secret in serialization
impl Serialize for MudrexConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MudrexConfig", 5)?;
        state.serialize_field("api_secret", "[REDACTED]")?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("requests_per_second", &self.requests_per_second)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for MudrexConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MudrexConfigHelper {
            api_secret: String,
            base_url: Option<String>,
            #[serde(default = "default_timeout_seconds")]
            timeout_seconds: u64,
            #[serde(default = "default_requests_per_second")]
            requests_per_second: f64,
            #[serde(default)]
            user_agent: Option<String>,
        }

        let helper = MudrexConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_secret: Secret::new(helper.api_secret),
            base_url: helper.base_url,
            timeout_seconds: helper.timeout_seconds,
            requests_per_second: helper.requests_per_second,
            user_agent: helper.user_agent,
        })
    }
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

const fn default_requests_per_second() -> f64 {
    DEFAULT_REQUESTS_PER_SECOND
}

impl MudrexConfig {
    /// Create a new configuration with the API secret and default settings
    #[must_use]
    pub fn new(api_secret: String) -> Self {
        Self {
            api_secret: Secret::new(api_secret),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            user_agent: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_SECRET` (e.g., `MUDREX_API_SECRET`)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_TIMEOUT_SECS` (optional, defaults to 30)
    /// - `{PREFIX}_REQUESTS_PER_SECOND` (optional, defaults to 2.0)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let secret_var = format!("{}_API_SECRET", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);
        let timeout_var = format!("{}_TIMEOUT_SECS", prefix);
        let rate_var = format!("{}_REQUESTS_PER_SECOND", prefix);

        let api_secret =
            env::var(&secret_var).map_err(|_| ConfigError::MissingEnvironmentVariable(secret_var))?;

        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}: {}", timeout_var, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        let requests_per_second = match env::var(&rate_var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidConfiguration(format!("{}: {}", rate_var, e)))?,
            Err(_) => DEFAULT_REQUESTS_PER_SECOND,
        };

        Ok(Self {
            api_secret: Secret::new(api_secret),
            base_url: env::var(&base_url_var).ok(),
            timeout_seconds,
            requests_per_second,
            user_agent: None,
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // fall through to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the request timeout covering connect, send and the full response read
    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the client-side request budget
    #[must_use]
    pub fn requests_per_second(mut self, requests_per_second: f64) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_secret.expose_secret().is_empty()
    }

    /// Get API secret (use carefully - exposes secret)
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
