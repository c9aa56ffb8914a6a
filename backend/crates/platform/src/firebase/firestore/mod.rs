//! Firestore REST Client
//!
//! Collections are addressed by slash-separated paths relative to the
//! database root (`todos`, `users/u1/todos`). Requests carry the signed-in
//! user's ID token when an auth client is attached, so security rules see
//! the same identity as the auth adapter.

pub mod query;
pub mod value;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{Map, Value as Json, json};
use tracing::debug;

use crate::config::FirebaseConfig;
use crate::firebase::auth::FirebaseAuth;
use crate::firebase::error::{FirebaseError, Service};
use crate::firebase::http::read_json;

use query::StructuredQuery;
use value::{Value, decode_fields, encode_fields};

/// Alias of the count aggregation
const COUNT_ALIAS: &str = "total";

/// A document as plain JSON fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Last path segment of `name`
    pub id: String,
    /// Full resource name
    pub name: String,
    pub fields: Map<String, Json>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
    #[serde(default)]
    create_time: Option<String>,
    #[serde(default)]
    update_time: Option<String>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        Document {
            id: raw.name.rsplit('/').next().unwrap_or_default().to_string(),
            fields: decode_fields(raw.fields),
            name: raw.name,
            create_time: raw.create_time,
            update_time: raw.update_time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct BatchGetItem {
    #[serde(default)]
    found: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationItem {
    #[serde(default)]
    result: Option<AggregationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationResult {
    #[serde(default)]
    aggregate_fields: HashMap<String, Value>,
}

pub struct FirestoreClient {
    http: reqwest::Client,
    config: Arc<FirebaseConfig>,
    auth: Option<Arc<FirebaseAuth>>,
}

impl FirestoreClient {
    pub fn new(http: reqwest::Client, config: Arc<FirebaseConfig>) -> Self {
        Self {
            http,
            config,
            auth: None,
        }
    }

    /// Authenticate requests as the auth client's current user
    pub fn with_auth(mut self, auth: Arc<FirebaseAuth>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Create a document with a backend-assigned id
    pub async fn create_document(
        &self,
        collection: &str,
        fields: &Map<String, Json>,
    ) -> Result<Document, FirebaseError> {
        let url = self.url(&collection_segments(collection), None)?;
        let request = self
            .http
            .post(url)
            .json(&json!({ "fields": encode_fields(fields) }));
        let raw: RawDocument = self.send(request).await?;
        debug!(collection, id = %raw.name.rsplit('/').next().unwrap_or_default(), "Document created");
        Ok(raw.into())
    }

    /// `Ok(None)` when the document does not exist
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, FirebaseError> {
        let url = self.document_url(collection, id)?;
        match self.send::<RawDocument>(self.http.get(url)).await {
            Ok(raw) => Ok(Some(raw.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch several documents in one round trip
    ///
    /// Missing ids are skipped; found documents keep the order of `ids`.
    pub async fn batch_get(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<Document>, FirebaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let names = ids
            .iter()
            .map(|id| {
                check_id(id)?;
                Ok(format!(
                    "{}/{}/{}",
                    self.config.documents_path(),
                    collection.trim_matches('/'),
                    id
                ))
            })
            .collect::<Result<Vec<_>, FirebaseError>>()?;

        let url = self.url(&[], Some("batchGet"))?;
        let request = self.http.post(url).json(&json!({ "documents": names }));
        let items: Vec<BatchGetItem> = self.send(request).await?;

        let mut found: HashMap<String, Document> = items
            .into_iter()
            .filter_map(|item| item.found)
            .map(|raw| {
                let doc = Document::from(raw);
                (doc.id.clone(), doc)
            })
            .collect();
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    /// Merge `fields` into an existing document
    ///
    /// Fails with a not-found error if the document does not exist. Fields
    /// not named in `fields` are left untouched.
    pub async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Json>,
    ) -> Result<Document, FirebaseError> {
        if fields.is_empty() {
            return self.get_document(collection, id).await?.ok_or_else(|| {
                FirebaseError::document_not_found(&format!(
                    "{}/{}/{}",
                    self.config.documents_path(),
                    collection,
                    id
                ))
            });
        }

        let url = self.document_url(collection, id)?;
        let mut params: Vec<(&str, String)> = fields
            .keys()
            .map(|k| ("updateMask.fieldPaths", quote_field_path(k)))
            .collect();
        params.push(("currentDocument.exists", "true".to_string()));

        let request = self
            .http
            .patch(url)
            .query(&params)
            .json(&json!({ "fields": encode_fields(fields) }));
        let raw: RawDocument = self.send(request).await?;
        Ok(raw.into())
    }

    /// Delete a document; deleting a missing document succeeds
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), FirebaseError> {
        let url = self.document_url(collection, id)?;
        let _: Json = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Run a structured query against `collection`'s parent
    pub async fn run_query(
        &self,
        collection: &str,
        query: &StructuredQuery,
    ) -> Result<Vec<Document>, FirebaseError> {
        let url = self.url(&parent_segments(collection), Some("runQuery"))?;
        let request = self
            .http
            .post(url)
            .json(&json!({ "structuredQuery": query }));
        let items: Vec<RunQueryItem> = self.send(request).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| item.document)
            .map(Document::from)
            .collect())
    }

    /// Number of documents matching the query's filter
    pub async fn count(
        &self,
        collection: &str,
        query: &StructuredQuery,
    ) -> Result<u64, FirebaseError> {
        let url = self.url(&parent_segments(collection), Some("runAggregationQuery"))?;
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": query.unpaged(),
                "aggregations": [{ "alias": COUNT_ALIAS, "count": {} }]
            }
        });
        let items: Vec<AggregationItem> = self.send(self.http.post(url).json(&body)).await?;

        let total = items
            .into_iter()
            .filter_map(|item| item.result)
            .find_map(|mut result| result.aggregate_fields.remove(COUNT_ALIAS));
        match total {
            Some(Value::IntegerValue(n)) => n.parse().map_err(|_| FirebaseError::Api {
                status: 502,
                code: "UNKNOWN".to_string(),
                message: format!("Count aggregation returned a non-integer: {n}"),
            }),
            _ => Ok(0),
        }
    }

    async fn send<R>(&self, request: RequestBuilder) -> Result<R, FirebaseError>
    where
        R: serde::de::DeserializeOwned,
    {
        let request = match &self.auth {
            Some(auth) => match auth.id_token(false).await? {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            None => request,
        };
        let response = request.send().await?;
        read_json(response, Service::Firestore).await
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, FirebaseError> {
        check_id(id)?;
        let mut segments = collection_segments(collection);
        segments.push(id);
        self.url(&segments, None)
    }

    /// Documents root plus `segments`, optionally suffixed with `:method`
    fn url(&self, segments: &[&str], method: Option<&str>) -> Result<Url, FirebaseError> {
        let mut url = Url::parse(&self.config.documents_url())
            .map_err(|e| FirebaseError::Config(format!("invalid Firestore URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| FirebaseError::Config("Firestore URL cannot be a base".to_string()))?
            .extend(segments);
        if let Some(method) = method {
            let path = format!("{}:{}", url.path(), method);
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn collection_segments(collection: &str) -> Vec<&str> {
    collection.split('/').filter(|s| !s.is_empty()).collect()
}

/// `users/u1/todos` -> `["users", "u1"]`
fn parent_segments(collection: &str) -> Vec<&str> {
    let mut segments = collection_segments(collection);
    segments.pop();
    segments
}

/// Last segment of a collection path, for `StructuredQuery::from`
pub fn collection_id(collection: &str) -> &str {
    collection
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or(collection)
}

fn check_id(id: &str) -> Result<(), FirebaseError> {
    if id.is_empty() || id.contains('/') || id == "." || id == ".." {
        return Err(FirebaseError::Api {
            status: 400,
            code: "INVALID_ARGUMENT".to_string(),
            message: format!("Invalid document id: {id:?}"),
        });
    }
    Ok(())
}

/// Quote a field name for a field path when it is not a plain identifier
fn quote_field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FirestoreClient {
        FirestoreClient::new(
            reqwest::Client::new(),
            Arc::new(FirebaseConfig::new("key", "demo")),
        )
    }

    #[test]
    fn test_document_url() {
        let url = client().document_url("users/u1/todos", "abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/users/u1/todos/abc"
        );
    }

    #[test]
    fn test_method_url() {
        let url = client()
            .url(&parent_segments("todos"), Some("runQuery"))
            .unwrap();
        assert!(url.as_str().ends_with("/databases/(default)/documents:runQuery"));

        let url = client()
            .url(&parent_segments("users/u1/todos"), Some("runQuery"))
            .unwrap();
        assert!(url.as_str().ends_with("/documents/users/u1:runQuery"));
    }

    #[test]
    fn test_ids_are_escaped_or_rejected() {
        let url = client().document_url("todos", "a b?c").unwrap();
        assert!(url.as_str().ends_with("/todos/a%20b%3Fc"));
        assert!(client().document_url("todos", "").is_err());
        assert!(client().document_url("todos", "a/b").is_err());
    }

    #[test]
    fn test_collection_id() {
        assert_eq!(collection_id("todos"), "todos");
        assert_eq!(collection_id("users/u1/todos/"), "todos");
    }

    #[test]
    fn test_quote_field_path() {
        assert_eq!(quote_field_path("title"), "title");
        assert_eq!(quote_field_path("_x1"), "_x1");
        assert_eq!(quote_field_path("due-date"), "`due-date`");
        assert_eq!(quote_field_path("a`b"), "`a\\`b`");
    }

    #[test]
    fn test_raw_document_conversion() {
        let raw: RawDocument = serde_json::from_value(serde_json::json!({
            "name": "projects/demo/databases/(default)/documents/todos/abc",
            "fields": {"title": {"stringValue": "x"}},
            "createTime": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let doc = Document::from(raw);
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.fields["title"], "x");
        assert_eq!(doc.update_time, None);
    }
}
