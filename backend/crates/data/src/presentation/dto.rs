//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

use crate::application::contract::{GetListParams, Variables};
use crate::domain::value_object::{
    filter::Filter,
    pagination::{Pagination, PaginationMode},
    sorter::Sorter,
};
use crate::error::{DataError, DataResult};

// ============================================================================
// List
// ============================================================================

/// `?current=2&pageSize=20&mode=server&sort=title:asc&filters=[...]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub current: Option<u32>,
    pub page_size: Option<u32>,
    pub mode: Option<PaginationMode>,
    /// `field:asc,field:desc`
    pub sort: Option<String>,
    /// JSON array of `{field, operator, value}`
    pub filters: Option<String>,
}

impl ListQuery {
    pub fn into_params(self, resource: String) -> DataResult<GetListParams> {
        let filters = match self.filters.as_deref().map(str::trim) {
            None | Some("") => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<Filter>>(raw)
                .map_err(|e| DataError::InvalidQuery(format!("filters: {e}")))?,
        };
        let sorters = self
            .sort
            .as_deref()
            .map(Sorter::parse_list)
            .unwrap_or_default();

        let defaults = Pagination::default();
        Ok(GetListParams {
            resource,
            pagination: Pagination {
                current: self.current.unwrap_or(defaults.current),
                page_size: self.page_size,
                mode: self.mode.unwrap_or(defaults.mode),
            },
            sorters,
            filters,
        })
    }
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateManyRequest {
    pub variables: Vec<Variables>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateManyRequest {
    pub ids: Vec<String>,
    #[serde(default)]
    pub variables: Variables,
}

/// Body of batch get and batch delete
#[derive(Debug, Clone, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::filter::FilterOperator;
    use crate::domain::value_object::sorter::SortOrder;

    #[test]
    fn test_list_query_into_params() {
        let query = ListQuery {
            current: Some(2),
            page_size: Some(5),
            mode: None,
            sort: Some("createdAt:desc".to_string()),
            filters: Some(r#"[{"field":"done","operator":"eq","value":false}]"#.to_string()),
        };
        let params = query.into_params("todos".to_string()).unwrap();

        assert_eq!(params.pagination, Pagination::server(2, 5));
        assert_eq!(params.sorters[0].order, SortOrder::Desc);
        assert_eq!(params.filters[0].operator, FilterOperator::Eq);
    }

    #[test]
    fn test_bad_filters_are_rejected() {
        let query = ListQuery {
            filters: Some("not json".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_params("todos".to_string()),
            Err(DataError::InvalidQuery(_))
        ));
    }
}
