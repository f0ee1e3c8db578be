//! Tolerant decoding of service responses.
//!
//! The service is inconsistent about wrapping: single entities arrive either
//! bare (`{"id": ..}`) or inside a keyed envelope (`{"list": {..}}`), often
//! next to a `message` string. Collections arrive as `{"lists": [..]}` where
//! the array is `null` when empty.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::types::{Item, List};

/// Decode a single entity, checking for the wrapper key first.
///
/// Returns `Ok(None)` when the body carries neither the wrapper nor a bare
/// entity (for example an empty body or a message-only acknowledgement).
pub fn decode_entity<T: DeserializeOwned>(
    body: &[u8],
    key: &str,
) -> Result<Option<T>, TransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(mut map) = value else {
        return Ok(None);
    };

    match map.remove(key) {
        Some(Value::Null) | None => {}
        Some(inner) => return Ok(Some(serde_json::from_value(inner)?)),
    }

    // Bare shape: the object itself is the entity
    if map.contains_key("id") {
        return Ok(Some(serde_json::from_value(Value::Object(map))?));
    }

    Ok(None)
}

#[derive(Deserialize)]
struct ListsEnvelope {
    #[serde(default)]
    lists: Option<Vec<List>>,
}

#[derive(Deserialize)]
struct ItemsEnvelope {
    #[serde(default)]
    items: Option<Vec<Item>>,
}

/// Decode `{ "lists": [...] }`; a null or missing array is an empty collection.
pub fn decode_lists(body: &[u8]) -> Result<Vec<List>, TransportError> {
    let envelope: ListsEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.lists.unwrap_or_default())
}

/// Decode `{ "items": [...] }`; a null or missing array is an empty collection.
pub fn decode_items(body: &[u8]) -> Result<Vec<Item>, TransportError> {
    let envelope: ItemsEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.items.unwrap_or_default())
}
