use crate::api::require_id;
use crate::api::types::{LeverageSetting, MarginType, SetLeverageRequest};
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use rust_decimal::Decimal;
use tracing::instrument;

pub struct Leverage<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Leverage<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, asset_id: &str) -> Result<LeverageSetting, MudrexError> {
        require_id("asset_id", asset_id)?;
        self.rest
            .get_json(&format!("/futures/{}/leverage", asset_id))
            .await
    }

    #[instrument(skip(self), fields(leverage = %leverage))]
    pub async fn set(
        &self,
        asset_id: &str,
        leverage: Decimal,
        margin_type: MarginType,
    ) -> Result<LeverageSetting, MudrexError> {
        require_id("asset_id", asset_id)?;
        let body = serde_json::to_value(SetLeverageRequest {
            leverage,
            margin_type,
        })?;
        self.rest
            .patch_json(&format!("/futures/{}/leverage", asset_id), &body)
            .await
    }
}
