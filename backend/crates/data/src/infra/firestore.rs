//! Firestore Document Store
//!
//! Translates list windows into structured queries and records into
//! Firestore documents through the shared REST client.

use std::sync::Arc;

use platform::firebase::firestore::query::{
    Direction, FieldOperator, StructuredQuery, UnaryOperator,
};
use platform::firebase::firestore::value::Value as FirestoreValue;
use platform::firebase::firestore::{FirestoreClient, collection_id};
use platform::firebase::{FirebaseApp, FirebaseError};
use serde_json::{Map, Value};

use crate::domain::entity::record::Record;
use crate::domain::repository::{DocumentStore, ListWindow};
use crate::domain::value_object::{
    filter::{Filter, FilterOperator},
    resource::Resource,
    sorter::{SortOrder, Sorter},
};
use crate::error::{DataError, DataResult};

pub struct FirestoreDocumentStore {
    client: Arc<FirestoreClient>,
}

impl FirestoreDocumentStore {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    pub fn from_app(app: &FirebaseApp) -> Self {
        Self::new(app.firestore())
    }
}

fn field_operator(op: FilterOperator) -> FieldOperator {
    match op {
        FilterOperator::Lt => FieldOperator::LessThan,
        FilterOperator::Lte => FieldOperator::LessThanOrEqual,
        FilterOperator::Gt => FieldOperator::GreaterThan,
        FilterOperator::Gte => FieldOperator::GreaterThanOrEqual,
        FilterOperator::Eq => FieldOperator::Equal,
        FilterOperator::Ne => FieldOperator::NotEqual,
        FilterOperator::In => FieldOperator::In,
        FilterOperator::Nin => FieldOperator::NotIn,
    }
}

fn direction(order: SortOrder) -> Direction {
    match order {
        SortOrder::Asc => Direction::Ascending,
        SortOrder::Desc => Direction::Descending,
    }
}

fn apply_filter(query: StructuredQuery, filter: &Filter) -> StructuredQuery {
    match (filter.operator, &filter.value) {
        (FilterOperator::Eq, Value::Null) => {
            query.and_where_unary(filter.field.clone(), UnaryOperator::IsNull)
        }
        (FilterOperator::Ne, Value::Null) => {
            query.and_where_unary(filter.field.clone(), UnaryOperator::IsNotNull)
        }
        (op, _) => query.and_where(
            filter.field.clone(),
            field_operator(op),
            FirestoreValue::from_json(&filter.operand()),
        ),
    }
}

fn apply_sorter(query: StructuredQuery, sorter: &Sorter) -> StructuredQuery {
    query.order_by(sorter.field.clone(), direction(sorter.order))
}

/// Build the structured query of one list call
///
/// No filters and no sorters yield a plain scan of the collection.
pub fn to_structured_query(resource: &Resource, window: ListWindow<'_>) -> StructuredQuery {
    let query = StructuredQuery::collection(collection_id(resource.as_str()));
    let query = window.filters.iter().fold(query, apply_filter);
    let query = window.sorters.iter().fold(query, apply_sorter);
    match window.page {
        Some(page) => query.offset(page.offset).limit(page.limit),
        None => query,
    }
}

fn not_found_as(resource: &Resource, id: &str) -> impl FnOnce(FirebaseError) -> DataError {
    let resource = resource.to_string();
    let id = id.to_string();
    move |e| {
        if e.is_not_found() {
            DataError::not_found(resource, id)
        } else {
            DataError::Backend(e)
        }
    }
}

impl DocumentStore for FirestoreDocumentStore {
    async fn insert(&self, resource: &Resource, fields: Map<String, Value>) -> DataResult<Record> {
        let doc = self
            .client
            .create_document(resource.as_str(), &fields)
            .await?;
        Ok(doc.into())
    }

    async fn find(&self, resource: &Resource, id: &str) -> DataResult<Option<Record>> {
        let doc = self.client.get_document(resource.as_str(), id).await?;
        Ok(doc.map(Record::from))
    }

    async fn find_many(&self, resource: &Resource, ids: &[String]) -> DataResult<Vec<Record>> {
        let docs = self.client.batch_get(resource.as_str(), ids).await?;
        Ok(docs.into_iter().map(Record::from).collect())
    }

    async fn query(&self, resource: &Resource, window: ListWindow<'_>) -> DataResult<Vec<Record>> {
        let query = to_structured_query(resource, window);
        let docs = self.client.run_query(resource.as_str(), &query).await?;
        Ok(docs.into_iter().map(Record::from).collect())
    }

    async fn count(&self, resource: &Resource, filters: &[Filter]) -> DataResult<u64> {
        let window = ListWindow {
            filters,
            ..Default::default()
        };
        let query = to_structured_query(resource, window);
        Ok(self.client.count(resource.as_str(), &query).await?)
    }

    async fn update(
        &self,
        resource: &Resource,
        id: &str,
        fields: Map<String, Value>,
    ) -> DataResult<Record> {
        let doc = self
            .client
            .update_document(resource.as_str(), id, &fields)
            .await
            .map_err(not_found_as(resource, id))?;
        Ok(doc.into())
    }

    async fn delete(&self, resource: &Resource, id: &str) -> DataResult<()> {
        Ok(self.client.delete_document(resource.as_str(), id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::pagination::Page;
    use serde_json::json;

    fn query_json(resource: &str, window: ListWindow<'_>) -> Value {
        let resource = Resource::new(resource).unwrap();
        serde_json::to_value(to_structured_query(&resource, window)).unwrap()
    }

    #[test]
    fn test_no_filters_no_sorters_is_plain_scan() {
        assert_eq!(
            query_json("todos", ListWindow::default()),
            json!({"from": [{"collectionId": "todos"}]})
        );
    }

    #[test]
    fn test_nested_collection_queries_its_last_segment() {
        assert_eq!(
            query_json("users/u1/todos", ListWindow::default())["from"],
            json!([{"collectionId": "todos"}])
        );
    }

    #[test]
    fn test_filters_sorters_and_page() {
        let filters = vec![
            Filter::new("priority", FilterOperator::Gte, json!(2)),
            Filter::new("status", FilterOperator::Nin, json!("archived")),
        ];
        let sorters = vec![Sorter::desc("priority")];
        let json = query_json(
            "todos",
            ListWindow {
                filters: &filters,
                sorters: &sorters,
                page: Some(Page { offset: 10, limit: 10 }),
            },
        );

        let conditions = json["where"]["compositeFilter"]["filters"].as_array().unwrap();
        assert_eq!(conditions[0]["fieldFilter"]["op"], "GREATER_THAN_OR_EQUAL");
        assert_eq!(conditions[0]["fieldFilter"]["value"], json!({"integerValue": "2"}));
        assert_eq!(conditions[1]["fieldFilter"]["op"], "NOT_IN");
        assert_eq!(
            conditions[1]["fieldFilter"]["value"],
            json!({"arrayValue": {"values": [{"stringValue": "archived"}]}})
        );
        assert_eq!(
            json["orderBy"],
            json!([{"field": {"fieldPath": "priority"}, "direction": "DESCENDING"}])
        );
        assert_eq!(json["offset"], 10);
        assert_eq!(json["limit"], 10);
    }

    #[test]
    fn test_every_operator_translates() {
        let expected = [
            (FilterOperator::Lt, "LESS_THAN"),
            (FilterOperator::Lte, "LESS_THAN_OR_EQUAL"),
            (FilterOperator::Gt, "GREATER_THAN"),
            (FilterOperator::Gte, "GREATER_THAN_OR_EQUAL"),
            (FilterOperator::Eq, "EQUAL"),
            (FilterOperator::Ne, "NOT_EQUAL"),
            (FilterOperator::In, "IN"),
            (FilterOperator::Nin, "NOT_IN"),
        ];
        for (op, wire) in expected {
            let filters = vec![Filter::new("f", op, json!(1))];
            let json = query_json(
                "todos",
                ListWindow {
                    filters: &filters,
                    ..Default::default()
                },
            );
            assert_eq!(json["where"]["fieldFilter"]["op"], wire, "{op:?}");
        }
    }

    #[test]
    fn test_null_comparisons_become_unary_filters() {
        let filters = vec![Filter::new("due", FilterOperator::Ne, Value::Null)];
        let json = query_json(
            "todos",
            ListWindow {
                filters: &filters,
                ..Default::default()
            },
        );
        assert_eq!(json["where"]["unaryFilter"]["op"], "IS_NOT_NULL");
    }
}
