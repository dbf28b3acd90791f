use crate::api::require_id;
use crate::api::types::{Asset, AssetPage, AssetQuery};
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use crate::core::types::path_with_query;
use tracing::instrument;

/// Tradable futures instruments
pub struct Assets<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Assets<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    /// List assets on the requested page
    #[instrument(skip(self, query), fields(page = query.pagination.page))]
    pub async fn list(&self, query: &AssetQuery) -> Result<Vec<Asset>, MudrexError> {
        Ok(self.list_page(query).await?.assets)
    }

    /// List assets together with the paging totals
    #[instrument(skip(self, query), fields(page = query.pagination.page))]
    pub async fn list_page(&self, query: &AssetQuery) -> Result<AssetPage, MudrexError> {
        let path = path_with_query("/assets", &query.query_pairs());
        self.rest.get_json(&path).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, asset_id: &str) -> Result<Asset, MudrexError> {
        require_id("asset_id", asset_id)?;
        self.rest.get_json(&format!("/assets/{}", asset_id)).await
    }
}
