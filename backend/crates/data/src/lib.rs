//! Data (Resource CRUD) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Record, filter/sort/pagination value objects, the `DocumentStore` seam
//! - `application/` - Use cases, the `DataProvider` contract and `DataAdapter`
//! - `infra/` - Firestore-backed and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Filtered, sorted, paged lists with a total count
//! - Single and batch reads (missing ids skipped)
//! - Create / update / delete, one at a time or in bounded-concurrency batches
//!   that report every item's outcome

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::adapter::DataAdapter;
pub use application::batch::{BatchFailure, BatchOutcome};
pub use application::config::DataConfig;
pub use application::contract::DataProvider;
pub use domain::entity::record::Record;
pub use error::{DataError, DataResult};
pub use infra::{FirestoreDocumentStore, InMemoryDocumentStore};
pub use presentation::router::data_router;

pub mod models {
    pub use crate::application::contract::{
        CreateManyParams, CreateParams, DataResponse, DeleteManyParams, DeleteOneParams,
        GetListParams, GetListResponse, GetManyParams, GetOneParams, UpdateManyParams,
        UpdateParams, Variables,
    };
    pub use crate::domain::value_object::{
        filter::{Filter, FilterOperator},
        pagination::{Pagination, PaginationMode},
        sorter::{SortOrder, Sorter},
    };
    pub use crate::presentation::dto::*;
}
