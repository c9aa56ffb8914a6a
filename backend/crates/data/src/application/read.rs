//! Read Use Cases

use std::sync::Arc;

use crate::application::contract::{DataResponse, GetManyParams, GetOneParams};
use crate::domain::entity::record::Record;
use crate::domain::repository::DocumentStore;
use crate::domain::value_object::resource::Resource;
use crate::error::{DataError, DataResult};

pub struct GetOneUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> GetOneUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, params: GetOneParams) -> DataResult<DataResponse<Record>> {
        let resource = Resource::new(&params.resource)?;
        let record = self
            .store
            .find(&resource, &params.id)
            .await?
            .ok_or_else(|| DataError::not_found(resource.as_str(), &params.id))?;
        Ok(DataResponse::new(record))
    }
}

pub struct GetManyUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> GetManyUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Missing ids are left out of the answer
    pub async fn execute(&self, params: GetManyParams) -> DataResult<DataResponse<Vec<Record>>> {
        let resource = Resource::new(&params.resource)?;
        let records = self.store.find_many(&resource, &params.ids).await?;
        Ok(DataResponse::new(records))
    }
}
