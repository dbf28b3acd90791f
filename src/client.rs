use crate::api::{Assets, Fees, Leverage, Orders, Positions, Wallet};
use crate::core::config::MudrexConfig;
use crate::core::errors::MudrexError;
use crate::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, SecretHeaderAuth};
use std::sync::Arc;
use tracing::debug;

/// Entry point to the Mudrex futures API
///
/// Every endpoint module holds a clone of the same pipeline, so they share one
/// connection pool and one rate limiter.
///
/// # Example
/// ```rust,no_run
/// use mudrex::api::types::{MarginType, OrderSide};
/// use mudrex::MudrexClient;
/// use rust_decimal::Decimal;
///
/// # async fn example() -> Result<(), mudrex::MudrexError> {
/// let client = MudrexClient::new("your-api-secret")?;
///
/// client.leverage.set("BTC-USD", Decimal::from(10), MarginType::Isolated).await?;
/// let order = client
///     .orders
///     .create_market("BTC-USD", OrderSide::Long, Decimal::new(1, 3), Decimal::from(10))
///     .await?;
/// println!("{}", order);
/// # Ok(())
/// # }
/// ```
pub struct MudrexClient<R: RestClient = ReqwestRest> {
    pub assets: Assets<R>,
    pub orders: Orders<R>,
    pub positions: Positions<R>,
    pub leverage: Leverage<R>,
    pub wallet: Wallet<R>,
    pub fees: Fees<R>,
    rest: R,
}

impl MudrexClient<ReqwestRest> {
    /// Client against the production API with default settings
    pub fn new(api_secret: &str) -> Result<Self, MudrexError> {
        Self::with_config(MudrexConfig::new(api_secret.to_string()))
    }

    pub fn with_config(config: MudrexConfig) -> Result<Self, MudrexError> {
        Ok(Self::from_rest(build_client(&config)?))
    }
}

impl<R: RestClient + Clone> MudrexClient<R> {
    /// Compose the endpoint modules over an existing pipeline
    pub fn from_rest(rest: R) -> Self {
        Self {
            assets: Assets::new(&rest),
            orders: Orders::new(&rest),
            positions: Positions::new(&rest),
            leverage: Leverage::new(&rest),
            wallet: Wallet::new(&rest),
            fees: Fees::new(&rest),
            rest,
        }
    }

    pub fn rest(&self) -> &R {
        &self.rest
    }

    /// Release the client and its transport. Requests already in flight on
    /// other clones of the pipeline are unaffected.
    pub fn close(self) {
        debug!("closing mudrex client");
        drop(self);
    }
}

/// Build the authenticated pipeline described by `config`
pub fn build_client(config: &MudrexConfig) -> Result<ReqwestRest, MudrexError> {
    let auth = SecretHeaderAuth::new(config.api_secret())?;

    let mut rest_config = RestClientConfig::new(config.resolved_base_url().to_string())
        .with_timeout(config.timeout_seconds)
        .with_requests_per_second(config.requests_per_second);
    if let Some(user_agent) = &config.user_agent {
        rest_config = rest_config.with_user_agent(user_agent.clone());
    }

    RestClientBuilder::new(rest_config)
        .with_authenticator(Arc::new(auth))
        .build()
}
