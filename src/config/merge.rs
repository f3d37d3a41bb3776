//! Field-by-field merging of layered configuration files.
//!
//! Used by the loader to stack the user file under the project file before
//! the tree is handed to resolution. Higher-tier values override lower-tier
//! values; lists are replaced entirely, not concatenated.

use serde_json::Value;

/// Merge `overlay` onto `base`, with `overlay` taking precedence.
///
/// - Mappings merge recursively: keys in the overlay override keys in the base
/// - Lists, strings, numbers, booleans are replaced entirely
/// - A null overlay preserves the base value (an unset key in a higher tier
///   must not erase a lower tier's value)
///
/// # Example
/// ```
/// use serde_json::json;
/// use train_harness::config::deep_merge;
///
/// let user = json!({
///     "default": { "runner": { "model": "TestModel", "seed": 1 } }
/// });
/// let project = json!({
///     "default": { "runner": { "seed": 42 } }
/// });
/// let merged = deep_merge(user, project);
/// // Result: { "default": { "runner": { "model": "TestModel", "seed": 42 } } }
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge a series of values in order, later values winning.
///
/// Equivalent to folding `deep_merge` over the list.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
