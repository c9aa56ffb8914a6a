//! Document Store Trait

use serde_json::{Map, Value};

use crate::domain::entity::record::Record;
use crate::domain::value_object::{
    filter::Filter, pagination::Page, resource::Resource, sorter::Sorter,
};
use crate::error::DataResult;

/// Filters, sort clauses and an optional page of one list query
#[derive(Debug, Clone, Copy, Default)]
pub struct ListWindow<'a> {
    pub filters: &'a [Filter],
    pub sorters: &'a [Sorter],
    pub page: Option<Page>,
}

#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Store `fields` under a backend-assigned id
    async fn insert(&self, resource: &Resource, fields: Map<String, Value>) -> DataResult<Record>;

    async fn find(&self, resource: &Resource, id: &str) -> DataResult<Option<Record>>;

    /// Found records in the order of `ids`; missing ids are skipped
    async fn find_many(&self, resource: &Resource, ids: &[String]) -> DataResult<Vec<Record>>;

    async fn query(&self, resource: &Resource, window: ListWindow<'_>) -> DataResult<Vec<Record>>;

    /// Number of records matching `filters`, ignoring any paging
    async fn count(&self, resource: &Resource, filters: &[Filter]) -> DataResult<u64>;

    /// Merge `fields` into an existing record; `NotFound` if it is missing
    async fn update(
        &self,
        resource: &Resource,
        id: &str,
        fields: Map<String, Value>,
    ) -> DataResult<Record>;

    /// Deleting a missing record succeeds
    async fn delete(&self, resource: &Resource, id: &str) -> DataResult<()>;
}
