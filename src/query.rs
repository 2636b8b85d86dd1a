use crate::error::{EstatError, Result};
use crate::request::Method;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// Free-form parameters for [`crate::Client::call_raw`]. Insertion order is
/// kept and becomes the order of the query string.
pub type Param = serde_json::Map<String, Value>;

/// Binds a parameter type to the e-Stat operation it is sent to
pub trait Endpoint: Serialize {
    /// Operation name, appended to the base URL
    const OPERATION: &'static str;

    /// HTTP method used for the operation
    const METHOD: Method = Method::Get;

    /// Value of the leading `limit` pair given the configured limit
    fn limit(&self, configured: u32) -> u32 {
        configured
    }
}

/// Serialize `appId`, `limit` and the given parameters into an
/// `application/x-www-form-urlencoded` query string.
///
/// `appId` and `limit` always come first. The parameters follow in their
/// serialization order; `None` fields are skipped, strings are sent as-is and
/// numbers as decimal. `appId` or `limit` keys inside `params` are sent again
/// after the leading pair.
///
/// # Errors
/// [`EstatError::InvalidParams`] if `params` does not serialize to a flat map
/// of scalars.
pub fn to_query_string<P>(app_id: &str, limit: u32, params: &P) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("appId", app_id);
    serializer.append_pair("limit", &limit.to_string());

    for (key, value) in to_pairs(params)? {
        serializer.append_pair(&key, &value);
    }

    Ok(serializer.finish())
}

/// Flatten parameters into ordered key/value pairs, skipping nulls
pub fn to_pairs<P>(params: &P) -> Result<Vec<(String, String)>>
where
    P: Serialize + ?Sized,
{
    let map = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(EstatError::InvalidParams(format!(
                "expected a map of parameters, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(EstatError::InvalidParams(format!(
                    "parameter {:?} is not a scalar",
                    key
                )))
            }
        };
        pairs.push((key, value));
    }

    Ok(pairs)
}
