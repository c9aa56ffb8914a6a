//! Data Adapter
//!
//! Implements the provider contract on top of any `DocumentStore`.

use std::sync::Arc;

use crate::application::batch::{
    BatchOutcome, CreateManyUseCase, DeleteManyUseCase, UpdateManyUseCase,
};
use crate::application::config::DataConfig;
use crate::application::contract::{
    CreateManyParams, CreateParams, DataProvider, DataResponse, DeleteManyParams, DeleteOneParams,
    GetListParams, GetListResponse, GetManyParams, GetOneParams, UpdateManyParams, UpdateParams,
};
use crate::application::get_list::GetListUseCase;
use crate::application::read::{GetManyUseCase, GetOneUseCase};
use crate::application::write::{CreateUseCase, DeleteOneUseCase, UpdateUseCase};
use crate::domain::entity::record::Record;
use crate::domain::repository::DocumentStore;
use crate::error::DataResult;

pub struct DataAdapter<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    config: Arc<DataConfig>,
}

impl<S> Clone for DataAdapter<S>
where
    S: DocumentStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> DataAdapter<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, config: DataConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }
}

impl<S> DataProvider for DataAdapter<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    async fn get_list(&self, params: GetListParams) -> DataResult<GetListResponse> {
        GetListUseCase::new(self.store.clone(), self.config.clone())
            .execute(params)
            .await
    }

    async fn get_one(&self, params: GetOneParams) -> DataResult<DataResponse<Record>> {
        GetOneUseCase::new(self.store.clone()).execute(params).await
    }

    async fn get_many(&self, params: GetManyParams) -> DataResult<DataResponse<Vec<Record>>> {
        GetManyUseCase::new(self.store.clone()).execute(params).await
    }

    async fn create(&self, params: CreateParams) -> DataResult<DataResponse<Record>> {
        CreateUseCase::new(self.store.clone()).execute(params).await
    }

    async fn create_many(&self, params: CreateManyParams) -> DataResult<BatchOutcome<Record>> {
        CreateManyUseCase::new(self.store.clone(), self.config.clone())
            .execute(params)
            .await
    }

    async fn update(&self, params: UpdateParams) -> DataResult<DataResponse<Record>> {
        UpdateUseCase::new(self.store.clone()).execute(params).await
    }

    async fn update_many(&self, params: UpdateManyParams) -> DataResult<BatchOutcome<Record>> {
        UpdateManyUseCase::new(self.store.clone(), self.config.clone())
            .execute(params)
            .await
    }

    async fn delete_one(&self, params: DeleteOneParams) -> DataResult<DataResponse<Record>> {
        DeleteOneUseCase::new(self.store.clone()).execute(params).await
    }

    async fn delete_many(&self, params: DeleteManyParams) -> DataResult<BatchOutcome<String>> {
        DeleteManyUseCase::new(self.store.clone(), self.config.clone())
            .execute(params)
            .await
    }

    fn api_url(&self) -> String {
        self.config.api_url.clone()
    }
}
