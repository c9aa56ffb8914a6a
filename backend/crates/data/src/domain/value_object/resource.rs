use std::fmt;

use crate::error::{DataError, DataResult};

/// A collection path (`todos`, `users/u1/todos`)
///
/// Collection paths have an odd number of non-empty segments; ids of the
/// form `__name__` are reserved by Firestore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource(String);

impl Resource {
    pub fn new(path: impl AsRef<str>) -> DataResult<Self> {
        let path = path.as_ref().trim().trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();

        if path.is_empty() {
            return Err(DataError::InvalidResource(
                "resource name cannot be empty".to_string(),
            ));
        }
        if segments.len() % 2 == 0 {
            return Err(DataError::InvalidResource(format!(
                "{path} names a document, not a collection"
            )));
        }
        if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
            return Err(DataError::InvalidResource(format!(
                "invalid path segment {bad:?} in {path}"
            )));
        }

        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !(segment.len() > 4 && segment.starts_with("__") && segment.ends_with("__"))
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Resource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
