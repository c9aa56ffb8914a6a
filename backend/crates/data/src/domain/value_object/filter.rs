//! Filter Predicates
//!
//! The operator table is total: the eight known tokens map one-to-one onto
//! the database's comparison operators and anything else means `in`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FilterOperator {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Ne,
    #[default]
    In,
    Nin,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 8] = [
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::In,
        FilterOperator::Nin,
    ];

    /// Unknown tokens fall back to `In`
    pub fn from_token(token: &str) -> Self {
        match token {
            "lt" => FilterOperator::Lt,
            "lte" => FilterOperator::Lte,
            "gt" => FilterOperator::Gt,
            "gte" => FilterOperator::Gte,
            "eq" => FilterOperator::Eq,
            "ne" => FilterOperator::Ne,
            "nin" => FilterOperator::Nin,
            _ => FilterOperator::In,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::In => "in",
            FilterOperator::Nin => "nin",
        }
    }

    /// The database's own spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Eq => "==",
            FilterOperator::Ne => "!=",
            FilterOperator::In => "in",
            FilterOperator::Nin => "not-in",
        }
    }

    /// `in`/`not-in` compare against a list of values
    pub fn takes_list(self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::Nin)
    }
}

impl From<String> for FilterOperator {
    fn from(token: String) -> Self {
        FilterOperator::from_token(&token)
    }
}

impl From<FilterOperator> for &'static str {
    fn from(op: FilterOperator) -> Self {
        op.token()
    }
}

/// `(field, operator, value)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    #[serde(default)]
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Value shaped for the operator: list operators always get an array
    pub fn operand(&self) -> Value {
        match &self.value {
            Value::Array(_) => self.value.clone(),
            scalar if self.operator.takes_list() => Value::Array(vec![scalar.clone()]),
            scalar => scalar.clone(),
        }
    }
}
