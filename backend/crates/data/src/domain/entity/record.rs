use kernel::id::RecordId;
use platform::firebase::Document;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Reserved key carrying the document id in the flattened form
pub const ID_FIELD: &str = "id";

/// One document of a resource
///
/// Serializes flat as `{"id": ..., ...fields}`. The database id always
/// wins: an `id` key in the stored fields is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: id.into(),
            fields,
        }
    }

    /// A record carrying only its id (delete results)
    pub fn id_only(id: impl Into<RecordId>) -> Self {
        Self::new(id, Map::new())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl From<Document> for Record {
    fn from(doc: Document) -> Self {
        Record::new(doc.id, doc.fields)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
