//! Application Layer
//!
//! Use cases, the provider contract and its adapter.

pub mod adapter;
pub mod batch;
pub mod config;
pub mod contract;
pub mod get_list;
pub mod read;
pub mod write;

// Re-exports
pub use adapter::DataAdapter;
pub use batch::{
    BatchFailure, BatchOutcome, CreateManyUseCase, DeleteManyUseCase, UpdateManyUseCase,
};
pub use config::DataConfig;
pub use contract::{
    CreateManyParams, CreateParams, DataProvider, DataResponse, DeleteManyParams, DeleteOneParams,
    GetListParams, GetListResponse, GetManyParams, GetOneParams, LocalDataProvider,
    UpdateManyParams, UpdateParams, Variables,
};
pub use get_list::GetListUseCase;
pub use read::{GetManyUseCase, GetOneUseCase};
pub use write::{CreateUseCase, DeleteOneUseCase, UpdateUseCase};
