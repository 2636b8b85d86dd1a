use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response holds the JSON document returned by e-Stat exactly as received.
///
/// Accessors only read; nothing here validates or reshapes the document.
/// A typical document has a single top-level key named after the operation
/// (`GET_STATS_LIST`, `GET_STATS_DATA`, ...) holding a `RESULT` object and
/// the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(Value);

impl Response {
    pub fn new(value: Value) -> Self {
        Response(value)
    }

    /// Get the raw document
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Take the raw document
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Apply unmarshals the whole document into the provided type
    pub fn apply<T>(&self) -> Result<T, crate::error::EstatError>
    where
        T: serde::de::DeserializeOwned,
    {
        T::deserialize(&self.0).map_err(|e| e.into())
    }

    /// Get a value by a slash-separated path.
    /// For example, "GET_STATS_LIST/RESULT/STATUS".
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Name of the top-level key, e.g. `GET_STATS_DATA`
    pub fn root_key(&self) -> Option<&str> {
        self.0.as_object()?.keys().next().map(|k| k.as_str())
    }

    fn root(&self) -> Option<&Value> {
        self.0.as_object()?.values().next()
    }

    /// `RESULT/STATUS` of the document. 0 means success upstream; values
    /// from 1 to 2 are warnings and 100 or more are errors.
    pub fn status(&self) -> Option<i64> {
        self.root()?.get("RESULT")?.get("STATUS").and_then(as_integer)
    }

    /// `RESULT/ERROR_MSG` of the document
    pub fn error_msg(&self) -> Option<&str> {
        self.root()?.get("RESULT")?.get("ERROR_MSG")?.as_str()
    }

    /// Continuation marker: the `startPosition` to request the next page
    /// with. `None` when the upstream returned everything.
    pub fn next_key(&self) -> Option<u64> {
        let root = self.root()?.as_object()?;
        root.values()
            .filter_map(|section| section.get("RESULT_INF")?.get("NEXT_KEY"))
            .find_map(as_integer)
            .and_then(|key| u64::try_from(key).ok())
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Response(value)
    }
}

impl From<Response> for Value {
    fn from(response: Response) -> Self {
        response.0
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
