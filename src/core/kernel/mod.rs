/// Transport layer shared by every endpoint module
///
/// The kernel owns everything between an endpoint call and the wire:
///
/// - `RestClient`: the request pipeline interface (`execute` plus envelope helpers)
/// - `ReqwestRest`: the reqwest-backed pipeline
/// - `RateLimiter`: spacing between admitted requests
/// - `Authenticator`: pluggable request authentication (`SecretHeaderAuth`)
///
/// Endpoint modules never talk to reqwest directly; they build a path and an
/// optional JSON body and hand both to a `RestClient`.
///
/// # Example
/// ```rust,no_run
/// use mudrex::core::kernel::*;
/// use mudrex::api::types::Asset;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), mudrex::MudrexError> {
/// let auth = SecretHeaderAuth::new("your-api-secret")?;
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://trade.mudrex.com/fapi/v1".to_string(),
/// ))
/// .with_authenticator(Arc::new(auth))
/// .build()?;
///
/// let asset: Asset = rest.get_json("/assets/BTCUSDT").await?;
/// # Ok(())
/// # }
/// ```
pub mod auth;
pub mod rate_limiter;
pub mod rest;

pub use auth::{Authenticator, SecretHeaderAuth, AUTH_HEADER};
pub use rate_limiter::RateLimiter;
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, RestResponse};
