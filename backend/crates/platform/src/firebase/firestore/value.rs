//! Firestore Value Codec
//!
//! Firestore's REST API wraps every field in a one-key object naming its
//! type (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). Documents
//! cross the adapter boundary as plain JSON, so this module converts in
//! both directions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as Json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 encoded as a decimal string
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Value::NullValue(()),
            Json::Bool(b) => Value::BooleanValue(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::IntegerValue(i.to_string()),
                None => Value::DoubleValue(n.as_f64().unwrap_or_default()),
            },
            Json::String(s) => Value::StringValue(s.clone()),
            Json::Array(items) => Value::ArrayValue(ArrayValue {
                values: items.iter().map(Value::from_json).collect(),
            }),
            Json::Object(map) => Value::MapValue(MapValue {
                fields: encode_fields(map),
            }),
        }
    }

    /// Plain JSON for a Firestore value
    ///
    /// Timestamps, references and bytes become strings; geo points become
    /// `{latitude, longitude}` objects. Non-finite doubles become `null`.
    pub fn into_json(self) -> Json {
        match self {
            Value::NullValue(()) => Json::Null,
            Value::BooleanValue(b) => Json::Bool(b),
            Value::IntegerValue(s) => s
                .parse::<i64>()
                .map(Json::from)
                .unwrap_or(Json::String(s)),
            Value::DoubleValue(d) => Number::from_f64(d).map_or(Json::Null, Json::Number),
            Value::TimestampValue(s)
            | Value::StringValue(s)
            | Value::BytesValue(s)
            | Value::ReferenceValue(s) => Json::String(s),
            Value::GeoPointValue(point) => serde_json::json!({
                "latitude": point.latitude,
                "longitude": point.longitude,
            }),
            Value::ArrayValue(array) => {
                Json::Array(array.values.into_iter().map(Value::into_json).collect())
            }
            Value::MapValue(map) => Json::Object(decode_fields(map.fields)),
        }
    }
}

pub fn encode_fields(fields: &Map<String, Json>) -> BTreeMap<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect()
}

pub fn decode_fields(fields: BTreeMap<String, Value>) -> Map<String, Json> {
    fields
        .into_iter()
        .map(|(k, v)| (k, v.into_json()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let value = Value::from_json(&json!({
            "title": "Buy milk",
            "done": false,
            "priority": 3,
            "score": 1.5,
            "tags": ["a"],
            "note": null
        }));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({
                "mapValue": {"fields": {
                    "title": {"stringValue": "Buy milk"},
                    "done": {"booleanValue": false},
                    "priority": {"integerValue": "3"},
                    "score": {"doubleValue": 1.5},
                    "tags": {"arrayValue": {"values": [{"stringValue": "a"}]}},
                    "note": {"nullValue": null}
                }}
            })
        );
    }

    #[test]
    fn test_decode_server_types() {
        let fields: BTreeMap<String, Value> = serde_json::from_value(json!({
            "createdAt": {"timestampValue": "2024-01-01T00:00:00Z"},
            "owner": {"referenceValue": "projects/p/databases/(default)/documents/users/u1"},
            "where": {"geoPointValue": {"latitude": 35.0, "longitude": 139.0}},
            "empty": {"arrayValue": {}},
            "nested": {"mapValue": {}},
            "big": {"integerValue": "9007199254740993"}
        }))
        .unwrap();
        let json = Json::Object(decode_fields(fields));
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["where"]["latitude"], 35.0);
        assert_eq!(json["empty"], json!([]));
        assert_eq!(json["nested"], json!({}));
        assert_eq!(json["big"], 9007199254740993_i64);
    }

    #[test]
    fn test_non_finite_double_becomes_null() {
        assert_eq!(Value::DoubleValue(f64::NAN).into_json(), Json::Null);
    }
}
