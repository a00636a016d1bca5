//! Decoding of the `{ Error }` / `{ Value }` reply envelope

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GatewayError, Reply};

/// Turn a raw reply body into a tagged result.
///
/// `Error` wins over `Value` when both are present. A body carrying neither
/// is an empty success. An explicit `"Value": null` is kept so list replies
/// can tell "empty list" from "no value".
pub fn decode(method: &str, body: Value) -> Reply<Value> {
    let Value::Object(mut fields) = body else {
        return Err(GatewayError::decode(method, "reply is not an object"));
    };

    if let Some(error) = fields.remove("Error") {
        let message = match error {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(GatewayError::remote(message));
    }
    Ok(fields.remove("Value"))
}

/// Decode the payload of a successful envelope into a concrete type.
pub fn decode_value<T: DeserializeOwned>(method: &str, value: Option<Value>) -> Reply<T> {
    value
        .filter(|v| !v.is_null())
        .map(|v| serde_json::from_value(v).map_err(|e| GatewayError::decode(method, e.to_string())))
        .transpose()
}

/// Like [`decode_value`], but a `null` payload is an empty list.
///
/// The device encodes an empty queue or directory as `null`.
pub fn decode_list<T: DeserializeOwned>(method: &str, value: Option<Value>) -> Reply<Vec<T>> {
    match value {
        Some(Value::Null) => Ok(Some(Vec::new())),
        other => decode_value(method, other),
    }
}
