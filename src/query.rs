//! Query-string encoding for the untyped parameter maps that polling and
//! search endpoints accept.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::{Error, Result};

/// Encodes a parameter map as an `application/x-www-form-urlencoded` string.
///
/// `params` must serialize to a JSON object, or to `null` for no parameters.
/// Strings are used verbatim, numbers and booleans by their JSON text. Arrays
/// repeat the key once per element. `null` and nested objects encode as an
/// empty value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let encoded = nethunt::query::stringify(&json!({ "created": "today" })).unwrap();
/// assert_eq!(encoded, "created=today");
///
/// let encoded = nethunt::query::stringify(&json!({ "q": "a&b=c" })).unwrap();
/// assert_eq!(encoded, "q=a%26b%3Dc");
/// ```
pub fn stringify<P>(params: &P) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(params).map_err(|e| Error::SerializationFailed(e.to_string()))?;

    let map = match value {
        Value::Null => return Ok(String::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::SerializationFailed(format!(
                "query parameters must be a map, got {}",
                kind(&other)
            )))
        }
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &map {
        match value {
            Value::Array(items) => {
                for item in items {
                    serializer.append_pair(key, &primitive(item));
                }
            }
            other => {
                serializer.append_pair(key, &primitive(other));
            }
        }
    }

    Ok(serializer.finish())
}

fn primitive(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}
