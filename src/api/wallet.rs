use crate::api::types::{FuturesBalance, SpotBalance, Transfer, TransferRequest, WalletType};
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use rust_decimal::Decimal;
use tracing::instrument;

/// Spot and futures wallet balances, and transfers between them
pub struct Wallet<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Wallet<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    #[instrument(skip(self))]
    pub async fn spot_balance(&self) -> Result<SpotBalance, MudrexError> {
        self.rest.get_json("/wallet/funds").await
    }

    #[instrument(skip(self))]
    pub async fn futures_balance(&self) -> Result<FuturesBalance, MudrexError> {
        self.rest.get_json("/wallet/balance").await
    }

    #[instrument(skip(self), fields(amount = %amount))]
    pub async fn transfer(
        &self,
        from: WalletType,
        to: WalletType,
        amount: Decimal,
    ) -> Result<Transfer, MudrexError> {
        if from == to {
            return Err(MudrexError::InvalidParameters(
                "transfer source and destination wallets must differ".to_string(),
            ));
        }
        let body = serde_json::to_value(TransferRequest {
            from_wallet_type: from,
            to_wallet_type: to,
            amount,
        })?;
        self.rest.post_json("/wallet/transfer", Some(&body)).await
    }

    pub async fn transfer_to_futures(&self, amount: Decimal) -> Result<Transfer, MudrexError> {
        self.transfer(WalletType::Spot, WalletType::Futures, amount)
            .await
    }

    pub async fn transfer_to_spot(&self, amount: Decimal) -> Result<Transfer, MudrexError> {
        self.transfer(WalletType::Futures, WalletType::Spot, amount)
            .await
    }
}
