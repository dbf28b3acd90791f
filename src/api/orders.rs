use crate::api::require_id;
use crate::api::types::{AmendOrderRequest, Order, OrderRequest, OrderSide};
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use crate::core::types::{path_with_query, Pagination};
use reqwest::Method;
use rust_decimal::Decimal;
use tracing::instrument;

/// Futures order placement and management
pub struct Orders<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Orders<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    /// Place an order on `asset_id`
    #[instrument(
        skip(self, request),
        fields(side = %request.side, trigger_type = ?request.trigger_type)
    )]
    pub async fn create(&self, asset_id: &str, request: &OrderRequest) -> Result<Order, MudrexError> {
        require_id("asset_id", asset_id)?;
        let body = serde_json::to_value(request)?;
        self.rest
            .post_json(&format!("/futures/{}/order", asset_id), Some(&body))
            .await
    }

    pub async fn create_market(
        &self,
        asset_id: &str,
        side: OrderSide,
        quantity: Decimal,
        leverage: Decimal,
    ) -> Result<Order, MudrexError> {
        self.create(asset_id, &OrderRequest::market(side, quantity, leverage))
            .await
    }

    pub async fn create_limit(
        &self,
        asset_id: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        leverage: Decimal,
    ) -> Result<Order, MudrexError> {
        self.create(
            asset_id,
            &OrderRequest::limit(side, quantity, price, leverage),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_open(&self, asset_id: &str) -> Result<Vec<Order>, MudrexError> {
        require_id("asset_id", asset_id)?;
        self.rest
            .get_json(&format!("/futures/{}/orders", asset_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, asset_id: &str, order_id: &str) -> Result<Order, MudrexError> {
        require_id("asset_id", asset_id)?;
        require_id("order_id", order_id)?;
        self.rest
            .get_json(&format!("/futures/{}/order/{}", asset_id, order_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn history(
        &self,
        asset_id: &str,
        pagination: Pagination,
    ) -> Result<Vec<Order>, MudrexError> {
        require_id("asset_id", asset_id)?;
        let path = path_with_query(
            &format!("/futures/{}/orders/history", asset_id),
            &pagination.query_pairs(),
        );
        self.rest.get_json(&path).await
    }

    /// Cancel an open order. Succeeds on the status alone; no payload is required.
    #[instrument(skip(self))]
    pub async fn cancel(&self, asset_id: &str, order_id: &str) -> Result<(), MudrexError> {
        require_id("asset_id", asset_id)?;
        require_id("order_id", order_id)?;
        self.rest
            .send_ack(
                Method::DELETE,
                &format!("/futures/{}/order/{}", asset_id, order_id),
                None,
            )
            .await
    }

    /// Change price and quantity of an open order
    #[instrument(skip(self))]
    pub async fn amend(
        &self,
        asset_id: &str,
        order_id: &str,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Order, MudrexError> {
        require_id("asset_id", asset_id)?;
        require_id("order_id", order_id)?;
        let body = serde_json::to_value(AmendOrderRequest { price, quantity })?;
        self.rest
            .patch_json(&format!("/futures/{}/order/{}", asset_id, order_id), &body)
            .await
    }
}
