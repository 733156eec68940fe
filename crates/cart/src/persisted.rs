//! Reading and writing the persisted line-item blob.
//!
//! The blob is a JSON array of line items. Reading is total: anything that is
//! not a well-formed line is dropped, never raised.

use std::collections::HashMap;

use aquastore_core::ProductId;
use serde_json::Value;
use tracing::warn;

use crate::item::CartLineItem;

/// Decode a persisted blob, keeping only structurally valid lines.
///
/// Lines repeating an earlier product ID are folded into the first
/// occurrence so the result holds at most one line per product.
pub fn decode(raw: &str) -> Vec<CartLineItem> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(kind = json_kind(&other), "Persisted cart is not a list, ignoring it");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Persisted cart is not valid JSON, ignoring it");
            return Vec::new();
        }
    };

    let mut items: Vec<CartLineItem> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let line = match serde_json::from_value::<CartLineItem>(entry) {
            Ok(line) => line,
            Err(e) => {
                warn!(index, error = %e, "Dropping malformed cart entry");
                continue;
            }
        };
        if let Err(e) = line.check() {
            warn!(index, error = %e, "Dropping invalid cart entry");
            continue;
        }

        match positions.get(line.product_id()) {
            Some(&position) => {
                warn!(index, product_id = %line.product_id(), "Merging duplicate cart entry");
                if let Some(existing) = items.get_mut(position) {
                    existing.increment(line.quantity());
                }
            }
            None => {
                positions.insert(line.product_id().clone(), items.len());
                items.push(line);
            }
        }
    }

    items
}

/// Encode lines as the persisted blob.
pub fn encode(items: &[CartLineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
