//! Write Use Cases

use std::sync::Arc;

use tracing::info;

use crate::application::contract::{CreateParams, DataResponse, DeleteOneParams, UpdateParams};
use crate::domain::entity::record::Record;
use crate::domain::repository::DocumentStore;
use crate::domain::value_object::resource::Resource;
use crate::error::DataResult;

pub struct CreateUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> CreateUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, params: CreateParams) -> DataResult<DataResponse<Record>> {
        let resource = Resource::new(&params.resource)?;
        let record = self.store.insert(&resource, params.variables).await?;
        info!(resource = %resource, id = %record.id, "Record created");
        Ok(DataResponse::new(record))
    }
}

pub struct UpdateUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> UpdateUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Answers with the whole record after the merge
    pub async fn execute(&self, params: UpdateParams) -> DataResult<DataResponse<Record>> {
        let resource = Resource::new(&params.resource)?;
        let record = self
            .store
            .update(&resource, &params.id, params.variables)
            .await?;
        info!(resource = %resource, id = %record.id, "Record updated");
        Ok(DataResponse::new(record))
    }
}

pub struct DeleteOneUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> DeleteOneUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, params: DeleteOneParams) -> DataResult<DataResponse<Record>> {
        let resource = Resource::new(&params.resource)?;
        self.store.delete(&resource, &params.id).await?;
        info!(resource = %resource, id = %params.id, "Record deleted");
        Ok(DataResponse::new(Record::id_only(params.id)))
    }
}
