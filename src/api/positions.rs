use crate::api::require_id;
use crate::api::types::{
    ClosePartialRequest, EditRiskOrderRequest, Position, RiskOrder, RiskOrderRequest,
    RiskOrderType,
};
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use crate::core::types::{path_with_query, Pagination};
use reqwest::Method;
use rust_decimal::Decimal;
use tracing::instrument;

/// Open positions and their protective orders
pub struct Positions<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Positions<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    #[instrument(skip(self))]
    pub async fn list_open(&self) -> Result<Vec<Position>, MudrexError> {
        self.rest.get_json("/positions").await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, position_id: &str) -> Result<Position, MudrexError> {
        require_id("position_id", position_id)?;
        self.rest
            .get_json(&format!("/positions/{}", position_id))
            .await
    }

    /// Close the whole position at market
    #[instrument(skip(self))]
    pub async fn close(&self, position_id: &str) -> Result<(), MudrexError> {
        require_id("position_id", position_id)?;
        self.rest
            .send_ack(
                Method::POST,
                &format!("/positions/{}/close", position_id),
                None,
            )
            .await
    }

    /// Close `quantity` of the position, leaving the rest open
    #[instrument(skip(self))]
    pub async fn close_partial(&self, position_id: &str, quantity: Decimal) -> Result<(), MudrexError> {
        require_id("position_id", position_id)?;
        let body = serde_json::to_value(ClosePartialRequest { quantity })?;
        self.rest
            .send_ack(
                Method::POST,
                &format!("/positions/{}/close", position_id),
                Some(&body),
            )
            .await
    }

    /// Flip the position to the opposite side with the same size
    #[instrument(skip(self))]
    pub async fn reverse(&self, position_id: &str) -> Result<(), MudrexError> {
        require_id("position_id", position_id)?;
        self.rest
            .send_ack(
                Method::POST,
                &format!("/positions/{}/reverse", position_id),
                None,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_risk_order(
        &self,
        position_id: &str,
        trigger_type: RiskOrderType,
        trigger_price: Decimal,
    ) -> Result<RiskOrder, MudrexError> {
        require_id("position_id", position_id)?;
        let body = serde_json::to_value(RiskOrderRequest {
            trigger_type,
            trigger_price,
        })?;
        self.rest
            .post_json(&format!("/positions/{}/risk-order", position_id), Some(&body))
            .await
    }

    pub async fn set_stop_loss(
        &self,
        position_id: &str,
        trigger_price: Decimal,
    ) -> Result<RiskOrder, MudrexError> {
        self.set_risk_order(position_id, RiskOrderType::StopLoss, trigger_price)
            .await
    }

    pub async fn set_take_profit(
        &self,
        position_id: &str,
        trigger_price: Decimal,
    ) -> Result<RiskOrder, MudrexError> {
        self.set_risk_order(position_id, RiskOrderType::TakeProfit, trigger_price)
            .await
    }

    /// Move the trigger of an existing stop-loss or take-profit
    #[instrument(skip(self))]
    pub async fn edit_risk_order(
        &self,
        position_id: &str,
        risk_order_id: &str,
        trigger_price: Decimal,
    ) -> Result<RiskOrder, MudrexError> {
        require_id("position_id", position_id)?;
        require_id("risk_order_id", risk_order_id)?;
        let body = serde_json::to_value(EditRiskOrderRequest { trigger_price })?;
        self.rest
            .patch_json(
                &format!("/positions/{}/risk-order/{}", position_id, risk_order_id),
                &body,
            )
            .await
    }

    /// Closed positions, newest first
    #[instrument(skip(self))]
    pub async fn history(&self, pagination: Pagination) -> Result<Vec<Position>, MudrexError> {
        let path = path_with_query("/positions/history", &pagination.query_pairs());
        self.rest.get_json(&path).await
    }
}
