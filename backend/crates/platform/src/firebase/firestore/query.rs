//! Structured Query Model
//!
//! Serializes to the `structuredQuery` body of `:runQuery` and
//! `:runAggregationQuery`.

use serde::Serialize;

use super::value::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    CompositeFilter(CompositeFilter),
    FieldFilter(FieldFilter),
    UnaryFilter(UnaryFilter),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeFilter {
    pub op: CompositeOperator,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompositeOperator {
    And,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: FieldOperator,
    pub value: Value,
}

/// Null checks cannot be expressed as field filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnaryFilter {
    pub op: UnaryOperator,
    pub field: FieldReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnaryOperator {
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldOperator {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    In,
    NotIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
    Descending,
}

impl StructuredQuery {
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection_id.into(),
            }],
            ..Default::default()
        }
    }

    /// AND another field condition onto the query
    pub fn and_where(self, field: impl Into<String>, op: FieldOperator, value: Value) -> Self {
        self.and(Filter::FieldFilter(FieldFilter {
            field: FieldReference {
                field_path: field.into(),
            },
            op,
            value,
        }))
    }

    /// AND a null check onto the query
    pub fn and_where_unary(self, field: impl Into<String>, op: UnaryOperator) -> Self {
        self.and(Filter::UnaryFilter(UnaryFilter {
            op,
            field: FieldReference {
                field_path: field.into(),
            },
        }))
    }

    fn and(mut self, condition: Filter) -> Self {
        self.filter = Some(match self.filter.take() {
            None => condition,
            Some(Filter::CompositeFilter(mut composite)) => {
                composite.filters.push(condition);
                Filter::CompositeFilter(composite)
            }
            Some(single) => Filter::CompositeFilter(CompositeFilter {
                op: CompositeOperator::And,
                filters: vec![single, condition],
            }),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(Order {
            field: FieldReference {
                field_path: field.into(),
            },
            direction,
        });
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = (offset > 0).then_some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Same filter without ordering or paging, for aggregations
    pub fn unpaged(&self) -> Self {
        Self {
            from: self.from.clone(),
            filter: self.filter.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_condition_is_not_wrapped() {
        let query = StructuredQuery::collection("todos").and_where(
            "done",
            FieldOperator::Equal,
            Value::BooleanValue(false),
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "from": [{"collectionId": "todos"}],
                "where": {"fieldFilter": {
                    "field": {"fieldPath": "done"},
                    "op": "EQUAL",
                    "value": {"booleanValue": false}
                }}
            })
        );
    }

    #[test]
    fn test_conditions_are_anded() {
        let query = StructuredQuery::collection("todos")
            .and_where("a", FieldOperator::GreaterThan, Value::IntegerValue("1".into()))
            .and_where("b", FieldOperator::NotIn, Value::ArrayValue(Default::default()))
            .and_where("c", FieldOperator::LessThanOrEqual, Value::NullValue(()))
            .order_by("a", Direction::Descending)
            .offset(20)
            .limit(10);
        let json = serde_json::to_value(&query).unwrap();
        let filters = json["where"]["compositeFilter"]["filters"].as_array().unwrap();
        assert_eq!(json["where"]["compositeFilter"]["op"], "AND");
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[1]["fieldFilter"]["op"], "NOT_IN");
        assert_eq!(json["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(json["offset"], 20);
        assert_eq!(json["limit"], 10);
    }

    #[test]
    fn test_unary_filter_shape() {
        let query = StructuredQuery::collection("todos").and_where_unary("due", UnaryOperator::IsNull);
        assert_eq!(
            serde_json::to_value(&query).unwrap()["where"],
            json!({"unaryFilter": {"op": "IS_NULL", "field": {"fieldPath": "due"}}})
        );
    }

    #[test]
    fn test_unpaged_drops_order_and_window() {
        let query = StructuredQuery::collection("todos")
            .order_by("a", Direction::Ascending)
            .offset(10)
            .limit(10)
            .unpaged();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, json!({"from": [{"collectionId": "todos"}]}));
    }

    #[test]
    fn test_zero_offset_is_omitted() {
        let query = StructuredQuery::collection("todos").offset(0);
        assert!(query.offset.is_none());
    }
}
