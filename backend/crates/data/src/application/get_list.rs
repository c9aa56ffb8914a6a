//! Get List Use Case
//!
//! Server mode fetches one page and counts the whole filtered set; client
//! and off modes fetch everything and report its length.

use std::sync::Arc;

use tracing::debug;

use crate::application::config::DataConfig;
use crate::application::contract::{GetListParams, GetListResponse};
use crate::domain::repository::{DocumentStore, ListWindow};
use crate::domain::value_object::resource::Resource;
use crate::error::DataResult;

pub struct GetListUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    config: Arc<DataConfig>,
}

impl<S> GetListUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, config: Arc<DataConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, params: GetListParams) -> DataResult<GetListResponse> {
        let resource = Resource::new(&params.resource)?;
        let page = params.pagination.page(self.config.default_page_size);
        let window = ListWindow {
            filters: &params.filters,
            sorters: &params.sorters,
            page,
        };

        let data = self.store.query(&resource, window).await?;
        let total = match page {
            Some(_) => self.store.count(&resource, &params.filters).await?,
            None => data.len() as u64,
        };

        debug!(
            resource = %resource,
            filters = params.filters.len(),
            sorters = params.sorters.len(),
            returned = data.len(),
            total,
            "List fetched"
        );
        Ok(GetListResponse { data, total })
    }
}
