pub mod verify;

use serde_json::{Map, Value};

use crate::domain::error::RegistryError;
use crate::engine::schema::{SchemaInfo, SchemaRegistry, analyze, basename, const_key};

/// Schema-driven key-order canonicalizer.
///
/// Each formatter owns its registry, so independent schema sets can coexist
/// in one process. Formatting never fails: wherever schema knowledge runs
/// out, the affected subtree falls back to recursive alphabetical order.
#[derive(Debug, Default)]
pub struct Formatter {
    registry: SchemaRegistry,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema document before formatting values that use it.
    pub fn add_schema(&mut self, document: Value) -> Result<(), RegistryError> {
        self.registry.add_schema(document)
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Reorder object keys throughout `value`.
    ///
    /// Structure, array order, and scalars are untouched; only key order
    /// changes. Output depends on the matched schema and the key set, never
    /// on input order, so the transform is idempotent.
    pub fn format(&self, value: &Value) -> Value {
        self.format_value(value, None)
    }

    fn format_value(&self, value: &Value, schema: Option<&SchemaInfo>) -> Value {
        match value {
            Value::Object(object) => self.format_object(object, schema),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.format_value(item, schema))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }

    fn format_object(&self, object: &Map<String, Value>, inherited: Option<&SchemaInfo>) -> Value {
        let mut effective = inherited;
        if effective.is_none() {
            // Only a context-free object consults its own `$schema`; nested
            // objects inherit context from their parent.
            if let Some(declared) = object.get("$schema").and_then(Value::as_str) {
                effective = self.registry.info(basename(declared));
            }
        }
        if let Some(info) = effective {
            if let Some(tag) = &info.discriminator {
                let selected = object
                    .get(tag)
                    .and_then(const_key)
                    .and_then(|key| info.variants.get(&key));
                if let Some(variant) = selected {
                    effective = Some(variant);
                }
            }
        }

        let ordered: &[String] = match effective {
            Some(info) => &info.keys,
            None => &[],
        };
        let mut formatted = Map::new();
        for key in ordered {
            if let Some(value) = object.get(key) {
                formatted.insert(key.clone(), self.format_property(value, key, effective));
            }
        }
        let mut remaining: Vec<&String> = object
            .keys()
            .filter(|key| !ordered.contains(*key))
            .collect();
        remaining.sort();
        for key in remaining {
            if let Some(value) = object.get(key.as_str()) {
                formatted.insert(key.clone(), self.format_property(value, key, effective));
            }
        }
        Value::Object(formatted)
    }

    fn format_property(&self, value: &Value, key: &str, parent: Option<&SchemaInfo>) -> Value {
        let Some(parent) = parent else {
            return self.format_value(value, None);
        };
        if let Some(reference) = parent.refs.get(key) {
            return match self.info_for_ref(reference) {
                Some(info) => self.format_value(value, Some(&info)),
                None => self.format_value(value, None),
            };
        }
        if value.is_array() {
            if let Some(item_info) = parent.array_items.get(key) {
                return self.format_value(value, Some(item_info));
            }
            if let Some(reference) = parent.refs.get(&format!("{key}[]")) {
                if let Some(info) = self.info_for_ref(reference) {
                    return self.format_value(value, Some(&info));
                }
            }
        }
        self.format_value(value, None)
    }

    /// Resolve a ref string into ordering info for the referenced shape.
    ///
    /// A ref that lands on an array-typed schema stands for its items.
    fn info_for_ref(&self, reference: &str) -> Option<SchemaInfo> {
        let mut fragment = self.registry.resolve_ref(reference)?;
        if fragment.get("type").and_then(Value::as_str) == Some("array") {
            fragment = fragment.get("items")?;
        }
        Some(analyze::parse_schema(fragment, &self.registry))
    }
}
