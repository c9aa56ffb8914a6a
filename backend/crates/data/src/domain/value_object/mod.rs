pub mod filter;
pub mod pagination;
pub mod resource;
pub mod sorter;
