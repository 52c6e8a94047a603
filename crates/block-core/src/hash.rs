use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::constants::BITS_PER_HEX_DIGIT;

/// SHA-256 over the JSON encoding of `fields`, as lowercase hex.
///
/// The fields are hashed as one JSON array, so their order is part of the
/// input and adjacent values cannot run into each other. Object keys are
/// sorted first: values that compare equal always hash alike.
pub fn crypto_hash(fields: &[Value]) -> String {
    let canonical = Value::Array(fields.iter().map(canonicalize).collect());
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Copy of `value` with every object's keys in sorted order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, item) in entries {
                sorted.insert(key.clone(), canonicalize(item));
            }
            Value::Object(sorted)
        }
        other => other.clone(),
    }
}

/// Expand every hex digit into its 4-bit binary form, keeping leading zeros.
///
/// Returns `None` if `hex` contains a non-hex character.
pub fn hex_to_binary(hex: &str) -> Option<String> {
    let mut out = String::with_capacity(hex.len() * BITS_PER_HEX_DIGIT);
    for c in hex.chars() {
        let nibble = c.to_digit(16)?;
        out.push_str(&format!("{nibble:04b}"));
    }
    Some(out)
}
