//! Data Provider Contract
//!
//! One operation per CRUD shape a frontend framework drives for a
//! resource. Failures are returned as the backend reported them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::batch::BatchOutcome;
use crate::domain::entity::record::Record;
use crate::domain::value_object::{filter::Filter, pagination::Pagination, sorter::Sorter};
use crate::error::DataResult;

pub type Variables = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct GetListParams {
    pub resource: String,
    pub pagination: Pagination,
    pub sorters: Vec<Sorter>,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default)]
pub struct GetOneParams {
    pub resource: String,
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetManyParams {
    pub resource: String,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    pub resource: String,
    pub variables: Variables,
}

#[derive(Debug, Clone, Default)]
pub struct CreateManyParams {
    pub resource: String,
    pub variables: Vec<Variables>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateParams {
    pub resource: String,
    pub id: String,
    pub variables: Variables,
}

/// The same `variables` are merged into every listed record
#[derive(Debug, Clone, Default)]
pub struct UpdateManyParams {
    pub resource: String,
    pub ids: Vec<String>,
    pub variables: Variables,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOneParams {
    pub resource: String,
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteManyParams {
    pub resource: String,
    pub ids: Vec<String>,
}

/// `{data, total}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetListResponse {
    pub data: Vec<Record>,
    pub total: u64,
}

/// `{data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[trait_variant::make(DataProvider: Send)]
pub trait LocalDataProvider {
    async fn get_list(&self, params: GetListParams) -> DataResult<GetListResponse>;

    async fn get_one(&self, params: GetOneParams) -> DataResult<DataResponse<Record>>;

    async fn get_many(&self, params: GetManyParams) -> DataResult<DataResponse<Vec<Record>>>;

    async fn create(&self, params: CreateParams) -> DataResult<DataResponse<Record>>;

    async fn create_many(&self, params: CreateManyParams) -> DataResult<BatchOutcome<Record>>;

    async fn update(&self, params: UpdateParams) -> DataResult<DataResponse<Record>>;

    async fn update_many(&self, params: UpdateManyParams) -> DataResult<BatchOutcome<Record>>;

    /// Answers with the deleted id
    async fn delete_one(&self, params: DeleteOneParams) -> DataResult<DataResponse<Record>>;

    async fn delete_many(&self, params: DeleteManyParams) -> DataResult<BatchOutcome<String>>;

    fn api_url(&self) -> String;
}
