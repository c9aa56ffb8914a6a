pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::record::Record;
pub use repository::{DocumentStore, LocalDocumentStore, ListWindow};
pub use value_object::{
    filter::{Filter, FilterOperator},
    pagination::{Page, Pagination, PaginationMode},
    resource::Resource,
    sorter::{SortOrder, Sorter},
};
