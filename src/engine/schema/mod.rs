pub mod analyze;
pub mod discriminator;
pub mod registry;

use std::collections::HashMap;

use serde_json::Value;

pub use registry::SchemaRegistry;

/// Ordering knowledge derived from one schema fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaInfo {
    /// Property names in canonical emission order, deduplicated.
    pub keys: Vec<String>,
    /// Property name to `$ref` string. A synthetic `"<name>[]"` entry
    /// describes the item schema of an array-typed property.
    pub refs: HashMap<String, String>,
    /// Property name to item schema, for array properties with an inline
    /// object `items`.
    pub array_items: HashMap<String, SchemaInfo>,
    /// Property whose `const` value selects a union variant.
    pub discriminator: Option<String>,
    /// Discriminator value to variant schema. Populated only when a
    /// discriminator was found.
    pub variants: HashMap<String, SchemaInfo>,
}

/// Map a `const` (or discriminator) value to its variant lookup key.
///
/// Strings map verbatim; numbers and booleans use their display form.
/// Null and compound values never act as discriminators.
pub(crate) fn const_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Strip any path prefix from a schema id or ref path.
pub(crate) fn basename(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, name)) => name,
        None => path,
    }
}
