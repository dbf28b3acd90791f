use crate::core::types::{decimal_str, Pagination};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// Wire enumerations. All travel as exact uppercase strings.

/// Direction of an order or position (`order_type` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    #[default]
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    #[default]
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarginType {
    #[default]
    Isolated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Open,
    Filled,
    PartiallyFilled,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    #[default]
    Open,
    Closed,
    Liquidated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletType {
    #[default]
    Spot,
    Futures,
}

/// Kind of protective order attached to a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskOrderType {
    StopLoss,
    TakeProfit,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::Filled => "FILLED",
            Self::PartiallyFilled => "PARTIALLY_FILLED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

impl fmt::Display for MarginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ISOLATED")
    }
}

// Request bodies

/// Body for `POST /futures/{asset_id}/order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub leverage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(rename = "order_type")]
    pub side: OrderSide,
    pub trigger_type: TriggerType,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub stoploss_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub takeprofit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "is_false")]
    pub reduce_only: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl OrderRequest {
    /// Market order executed at the best available price
    pub fn market(side: OrderSide, quantity: Decimal, leverage: Decimal) -> Self {
        Self {
            leverage,
            quantity,
            side,
            trigger_type: TriggerType::Market,
            price: None,
            stoploss_price: None,
            takeprofit_price: None,
            reduce_only: false,
        }
    }

    /// Limit order resting at `price`
    pub fn limit(side: OrderSide, quantity: Decimal, price: Decimal, leverage: Decimal) -> Self {
        Self {
            trigger_type: TriggerType::Limit,
            price: Some(price),
            ..Self::market(side, quantity, leverage)
        }
    }

    pub fn with_stop_loss(mut self, price: Decimal) -> Self {
        self.stoploss_price = Some(price);
        self
    }

    pub fn with_take_profit(mut self, price: Decimal) -> Self {
        self.takeprofit_price = Some(price);
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }
}

/// Body for amending an open order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendOrderRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetLeverageRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub leverage: Decimal,
    pub margin_type: MarginType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosePartialRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskOrderRequest {
    pub trigger_type: RiskOrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub trigger_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRiskOrderRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub trigger_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub from_wallet_type: WalletType,
    pub to_wallet_type: WalletType,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Filters for listing assets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub pagination: Pagination,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl AssetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.pagination = Pagination::new(page, per_page);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn sort_order(mut self, order: impl Into<String>) -> Self {
        self.sort_order = Some(order.into());
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = self.pagination.query_pairs();
        if let Some(sort_by) = self.sort_by.as_ref().filter(|s| !s.is_empty()) {
            params.push(("sort_by", sort_by.clone()));
        }
        if let Some(sort_order) = self.sort_order.as_ref().filter(|s| !s.is_empty()) {
            params.push(("sort_order", sort_order.clone()));
        }
        params
    }
}

// Response payloads. Decimal values arrive as strings; a missing, null or empty
// value reads as `None`.

/// Render an optional wire decimal, `-` when absent
fn display_decimal(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub asset_id: String,
    pub symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    #[serde(with = "decimal_str")]
    pub min_quantity: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub max_quantity: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub quantity_step: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub min_leverage: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub max_leverage: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub maker_fee: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub taker_fee: Option<Decimal>,
    pub is_active: bool,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (max {}x)", self.symbol, display_decimal(self.max_leverage))
    }
}

/// One page of the asset listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPage {
    pub assets: Vec<Asset>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub asset_id: String,
    #[serde(rename = "order_type")]
    pub side: OrderSide,
    pub trigger_type: TriggerType,
    #[serde(with = "decimal_str")]
    pub price: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub quantity: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub filled_quantity: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub avg_filled_price: Option<Decimal>,
    pub status: OrderStatus,
    #[serde(with = "decimal_str")]
    pub leverage: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub stoploss_price: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub takeprofit_price: Option<Decimal>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    pub reduce_only: bool,
}

impl Order {
    /// Still working on the book
    pub fn is_active(&self) -> bool {
        matches!(self.status, OrderStatus::Open | OrderStatus::PartiallyFilled)
    }

    /// Quantity not yet filled, `None` when the order quantity is unknown
    pub fn remaining_quantity(&self) -> Option<Decimal> {
        let quantity = self.quantity?;
        let filled = self.filled_quantity.unwrap_or(Decimal::ZERO);
        Some((quantity - filled).max(Decimal::ZERO))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {} {} {}", self.order_id, self.symbol, self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub position_id: String,
    pub symbol: String,
    pub asset_id: String,
    #[serde(with = "decimal_str")]
    pub entry_price: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub quantity: Option<Decimal>,
    pub side: OrderSide,
    pub status: PositionStatus,
    #[serde(with = "decimal_str")]
    pub leverage: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub unrealized_pnl: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub realized_pnl: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub margin: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub margin_ratio: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub mark_price: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub stop_loss: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub take_profit: Option<Decimal>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Position {
    /// Unrealized PnL as a percentage of the margin posted.
    ///
    /// `None` when either value is missing or the margin is zero.
    pub fn pnl_percentage(&self) -> Option<Decimal> {
        let pnl = self.unrealized_pnl?;
        let margin = self.margin?;
        if margin.is_zero() {
            return None;
        }
        pnl.checked_div(margin)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position {} {} uPnL {}",
            self.symbol,
            self.side,
            display_decimal(self.unrealized_pnl)
        )
    }
}

/// Stop-loss or take-profit order attached to a position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskOrder {
    pub order_id: String,
    pub position_id: String,
    pub order_type: String,
    #[serde(with = "decimal_str")]
    pub trigger_price: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub execution_price: Option<Decimal>,
    pub status: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeverageSetting {
    pub asset_id: String,
    #[serde(with = "decimal_str")]
    pub leverage: Option<Decimal>,
    pub margin_type: MarginType,
}

impl fmt::Display for LeverageSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x {}",
            self.asset_id,
            display_decimal(self.leverage),
            self.margin_type
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotBalance {
    #[serde(with = "decimal_str")]
    pub total: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub available: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub rewards: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub withdrawable: Option<Decimal>,
    pub currency: String,
}

impl fmt::Display for SpotBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spot {} {} (available {})",
            display_decimal(self.total),
            self.currency,
            display_decimal(self.available)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuturesBalance {
    #[serde(with = "decimal_str")]
    pub balance: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub available_transfer: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub unrealized_pnl: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub margin_used: Option<Decimal>,
    pub currency: String,
}

impl fmt::Display for FuturesBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Futures {} {} (uPnL {})",
            display_decimal(self.balance),
            self.currency,
            display_decimal(self.unrealized_pnl)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub transaction_id: String,
    pub success: bool,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transfer {} success={}", self.transaction_id, self.success)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeRecord {
    pub asset_id: String,
    pub symbol: String,
    #[serde(with = "decimal_str")]
    pub fee_amount: Option<Decimal>,
    #[serde(with = "decimal_str")]
    pub fee_rate: Option<Decimal>,
    pub trade_type: String,
    pub order_id: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Display for FeeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fee {} {} ({})",
            self.symbol,
            display_decimal(self.fee_amount),
            self.trade_type
        )
    }
}

/// Timestamps arrive as RFC 3339, sometimes without an offset (read as UTC)
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }

        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Some(Utc.from_utc_datetime(&naive)))
            .map_err(serde::de::Error::custom)
    }
}
