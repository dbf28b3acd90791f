use crate::api::types::FeeRecord;
use crate::core::errors::MudrexError;
use crate::core::kernel::RestClient;
use crate::core::types::{path_with_query, Pagination};
use tracing::instrument;

pub struct Fees<R: RestClient> {
    rest: R,
}

impl<R: RestClient> Fees<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self { rest: rest.clone() }
    }

    /// Trading fees charged on past fills
    #[instrument(skip(self))]
    pub async fn history(&self, pagination: Pagination) -> Result<Vec<FeeRecord>, MudrexError> {
        let path = path_with_query("/fees/history", &pagination.query_pairs());
        self.rest.get_json(&path).await
    }
}
