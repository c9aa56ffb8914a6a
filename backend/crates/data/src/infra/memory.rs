//! In-memory document store
//!
//! Follows Firestore's observable rules closely enough for tests and the
//! bridge's offline mode: 20 character ids, top-level merge on update,
//! documents without a compared or ordered field never match, and values
//! of different types order by type before value.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nid::Nanoid;
use nid::alphabet::Base62Alphabet;
use serde_json::{Map, Value};

use crate::domain::entity::record::Record;
use crate::domain::repository::{DocumentStore, ListWindow};
use crate::domain::value_object::{
    filter::{Filter, FilterOperator},
    resource::Resource,
    sorter::{SortOrder, Sorter},
};
use crate::error::{DataError, DataResult};

type DocId = Nanoid<20, Base62Alphabet>;

type Collection = BTreeMap<String, Map<String, Value>>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Collection>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document under a chosen id
    pub fn with_record(self, resource: &str, id: &str, fields: Map<String, Value>) -> Self {
        self.lock()
            .entry(resource.trim_matches('/').to_string())
            .or_default()
            .insert(id.to_string(), fields);
        self
    }

    pub fn len(&self, resource: &str) -> usize {
        self.lock()
            .get(resource.trim_matches('/'))
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, resource: &str) -> bool {
        self.len(resource) == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Collection>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Matching documents of `resource`, ordered and windowed
    fn select(&self, resource: &Resource, window: ListWindow<'_>) -> Vec<Record> {
        let collections = self.lock();
        let Some(collection) = collections.get(resource.as_str()) else {
            return Vec::new();
        };

        let mut matched: Vec<(&String, &Map<String, Value>)> = collection
            .iter()
            .filter(|(_, fields)| window.filters.iter().all(|f| matches(fields, f)))
            .filter(|(_, fields)| {
                window
                    .sorters
                    .iter()
                    .all(|s| lookup(fields, &s.field).is_some())
            })
            .collect();

        matched.sort_by(|(a_id, a), (b_id, b)| {
            window
                .sorters
                .iter()
                .map(|sorter| order_by(a, b, sorter))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a_id.cmp(b_id))
        });

        let (offset, limit) = match window.page {
            Some(page) => (page.offset as usize, page.limit as usize),
            None => (0, usize::MAX),
        };
        matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(id, fields)| Record::new(id.as_str(), fields.clone()))
            .collect()
    }
}

/// Resolve a dotted field path
fn lookup<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = fields.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.as_object()?.get(segment))
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Same-type comparison; `None` across types
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                match total_order(l, r) {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        (Value::Object(_), Value::Object(_)) => (a == b).then_some(Ordering::Equal),
        _ => None,
    }
}

fn total_order(a: &Value, b: &Value) -> Ordering {
    type_rank(a)
        .cmp(&type_rank(b))
        .then_with(|| compare(a, b).unwrap_or(Ordering::Equal))
}

fn equals(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Equal)
}

fn order_by(a: &Map<String, Value>, b: &Map<String, Value>, sorter: &Sorter) -> Ordering {
    let ordering = match (lookup(a, &sorter.field), lookup(b, &sorter.field)) {
        (Some(x), Some(y)) => total_order(x, y),
        _ => Ordering::Equal,
    };
    match sorter.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn matches(fields: &Map<String, Value>, filter: &Filter) -> bool {
    let Some(value) = lookup(fields, &filter.field) else {
        return false;
    };
    let operand = filter.operand();
    let in_list = || {
        operand
            .as_array()
            .is_some_and(|items| items.iter().any(|item| equals(value, item)))
    };

    match filter.operator {
        FilterOperator::Lt => compare(value, &operand).is_some_and(Ordering::is_lt),
        FilterOperator::Lte => compare(value, &operand).is_some_and(Ordering::is_le),
        FilterOperator::Gt => compare(value, &operand).is_some_and(Ordering::is_gt),
        FilterOperator::Gte => compare(value, &operand).is_some_and(Ordering::is_ge),
        FilterOperator::Eq => equals(value, &operand),
        FilterOperator::Ne => !equals(value, &operand),
        FilterOperator::In => in_list(),
        FilterOperator::Nin => !value.is_null() && !in_list(),
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, resource: &Resource, fields: Map<String, Value>) -> DataResult<Record> {
        let id = DocId::new().as_str().to_string();
        self.lock()
            .entry(resource.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(Record::new(id, fields))
    }

    async fn find(&self, resource: &Resource, id: &str) -> DataResult<Option<Record>> {
        Ok(self
            .lock()
            .get(resource.as_str())
            .and_then(|c| c.get(id))
            .map(|fields| Record::new(id, fields.clone())))
    }

    async fn find_many(&self, resource: &Resource, ids: &[String]) -> DataResult<Vec<Record>> {
        let collections = self.lock();
        let Some(collection) = collections.get(resource.as_str()) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| {
                collection
                    .get(id)
                    .map(|fields| Record::new(id.as_str(), fields.clone()))
            })
            .collect())
    }

    async fn query(&self, resource: &Resource, window: ListWindow<'_>) -> DataResult<Vec<Record>> {
        Ok(self.select(resource, window))
    }

    async fn count(&self, resource: &Resource, filters: &[Filter]) -> DataResult<u64> {
        let window = ListWindow {
            filters,
            ..Default::default()
        };
        Ok(self.select(resource, window).len() as u64)
    }

    async fn update(
        &self,
        resource: &Resource,
        id: &str,
        fields: Map<String, Value>,
    ) -> DataResult<Record> {
        let mut collections = self.lock();
        let stored = collections
            .get_mut(resource.as_str())
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| DataError::not_found(resource.as_str(), id))?;
        stored.extend(fields);
        Ok(Record::new(id, stored.clone()))
    }

    async fn delete(&self, resource: &Resource, id: &str) -> DataResult<()> {
        if let Some(collection) = self.lock().get_mut(resource.as_str()) {
            collection.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::pagination::Page;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn todos() -> (InMemoryDocumentStore, Resource) {
        let store = InMemoryDocumentStore::new()
            .with_record("todos", "a", fields(json!({"title": "a", "priority": 3, "tags": ["x"]})))
            .with_record("todos", "b", fields(json!({"title": "b", "priority": 1, "meta": {"owner": "u1"}})))
            .with_record("todos", "c", fields(json!({"title": "c", "priority": 2.5})))
            .with_record("todos", "d", fields(json!({"title": "d"})));
        (store, Resource::new("todos").unwrap())
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_comparison_filters_skip_missing_fields() {
        let (store, todos) = todos();
        let filters = [Filter::new("priority", FilterOperator::Gte, json!(2))];
        let found = store
            .query(&todos, ListWindow { filters: &filters, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["a", "c"]);

        let filters = [Filter::new("priority", FilterOperator::Ne, json!(1))];
        let found = store
            .query(&todos, ListWindow { filters: &filters, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_list_operators_and_nested_paths() {
        let (store, todos) = todos();
        let filters = [Filter::new("title", FilterOperator::Nin, json!(["a", "b"]))];
        let found = store
            .query(&todos, ListWindow { filters: &filters, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["c", "d"]);

        let filters = [Filter::new("meta.owner", FilterOperator::In, json!("u1"))];
        let found = store
            .query(&todos, ListWindow { filters: &filters, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["b"]);
    }

    #[tokio::test]
    async fn test_sort_and_page() {
        let (store, todos) = todos();
        let sorters = [Sorter::desc("priority")];
        let window = ListWindow {
            sorters: &sorters,
            page: Some(Page { offset: 1, limit: 5 }),
            ..Default::default()
        };
        let found = store.query(&todos, window).await.unwrap();
        // "d" has no priority and is not ordered
        assert_eq!(ids(&found), vec!["c", "b"]);
        assert_eq!(store.count(&todos, &[]).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let (store, todos) = todos();
        let updated = store
            .update(&todos, "b", fields(json!({"priority": 9, "done": true})))
            .await
            .unwrap();
        assert_eq!(updated.get("title"), Some(&json!("b")));
        assert_eq!(updated.get("priority"), Some(&json!(9)));
        assert_eq!(updated.get("done"), Some(&json!(true)));

        let missing = store.update(&todos, "zzz", Map::new()).await;
        assert!(matches!(missing, Err(DataError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_insert_assigns_firestore_style_ids() {
        let store = InMemoryDocumentStore::new();
        let todos = Resource::new("todos").unwrap();
        let record = store.insert(&todos, fields(json!({"title": "t"}))).await.unwrap();
        assert_eq!(record.id.as_str().len(), 20);
        assert!(record.id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(store.len("todos"), 1);
    }
}
