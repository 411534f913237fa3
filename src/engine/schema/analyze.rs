use serde_json::{Map, Value};

use crate::engine::schema::{SchemaInfo, SchemaRegistry, const_key, discriminator};

/// Derive ordering info from one schema fragment.
///
/// Total over arbitrary JSON: a fragment that does not look like an object
/// schema produces an empty `SchemaInfo` instead of failing registration.
pub fn parse_schema(fragment: &Value, registry: &SchemaRegistry) -> SchemaInfo {
    let mut info = SchemaInfo::default();
    let Some(fragment) = fragment.as_object() else {
        return info;
    };

    match fragment.get("properties").and_then(Value::as_object) {
        Some(properties) => {
            info.keys = properties.keys().cloned().collect();
            parse_properties(properties, registry, &mut info);
        }
        None => {
            // A fragment without its own `properties` is treated as a union
            // when it declares variants.
            if let Some(variants) = union_variants(fragment) {
                parse_union(variants, registry, &mut info);
            }
        }
    }
    info
}

/// The `oneOf` variant list, falling back to `anyOf`.
fn union_variants(fragment: &Map<String, Value>) -> Option<&Vec<Value>> {
    fragment
        .get("oneOf")
        .or_else(|| fragment.get("anyOf"))
        .and_then(Value::as_array)
}

fn parse_union(variants: &[Value], registry: &SchemaRegistry, info: &mut SchemaInfo) {
    let resolved: Vec<Value> = variants
        .iter()
        .map(|variant| resolve_variant(variant, registry))
        .collect();

    for variant in &resolved {
        for key in extract_keys(variant) {
            if !info.keys.contains(&key) {
                info.keys.push(key);
            }
        }
    }

    match discriminator::find_discriminator(&resolved) {
        Some(tag) => {
            for variant in &resolved {
                let Some(tag_value) = variant_const(variant, &tag) else {
                    continue;
                };
                let Some(key) = const_key(tag_value) else {
                    continue;
                };
                info.variants.insert(key, parse_schema(variant, registry));
            }
            info.discriminator = Some(tag);
        }
        None => {
            // Untagged union: fold every variant's maps in, later variants
            // overwriting earlier ones on key collisions.
            for variant in &resolved {
                let variant_info = parse_schema(variant, registry);
                info.refs.extend(variant_info.refs);
                info.array_items.extend(variant_info.array_items);
            }
        }
    }
}

fn parse_properties(
    properties: &Map<String, Value>,
    registry: &SchemaRegistry,
    info: &mut SchemaInfo,
) {
    for (name, property) in properties {
        if let Some(reference) = property.get("$ref").and_then(Value::as_str) {
            info.refs.insert(name.clone(), reference.to_string());
            continue;
        }
        if property.get("type").and_then(Value::as_str) == Some("array") {
            parse_array_property(name, property, registry, info);
            continue;
        }
        if let Some(variants) = property.as_object().and_then(union_variants) {
            // A property-level union of ref'd shapes collapses to the first
            // `$ref` it declares.
            let first_ref = variants
                .iter()
                .find_map(|variant| variant.get("$ref").and_then(Value::as_str));
            if let Some(reference) = first_ref {
                info.refs.insert(name.clone(), reference.to_string());
            }
        }
    }
}

fn parse_array_property(
    name: &str,
    property: &Value,
    registry: &SchemaRegistry,
    info: &mut SchemaInfo,
) {
    let Some(items) = property.get("items") else {
        return;
    };
    let Some(items_object) = items.as_object() else {
        return;
    };
    if tagged_union(items_object, registry) {
        info.array_items
            .insert(name.to_string(), parse_schema(items, registry));
    } else if let Some(reference) = items_object.get("$ref").and_then(Value::as_str) {
        info.refs.insert(format!("{name}[]"), reference.to_string());
    } else {
        info.array_items
            .insert(name.to_string(), parse_schema(items, registry));
    }
}

/// Whether an inline item schema is a union with a detectable discriminator.
fn tagged_union(items: &Map<String, Value>, registry: &SchemaRegistry) -> bool {
    union_variants(items).is_some_and(|variants| {
        let resolved: Vec<Value> = variants
            .iter()
            .map(|variant| resolve_variant(variant, registry))
            .collect();
        discriminator::find_discriminator(&resolved).is_some()
    })
}

/// Swap a `$ref` variant for its registered target; unresolvable refs stay
/// as-is and contribute nothing.
fn resolve_variant(variant: &Value, registry: &SchemaRegistry) -> Value {
    let reference = variant.get("$ref").and_then(Value::as_str);
    match reference.and_then(|reference| registry.resolve_ref(reference)) {
        Some(resolved) => resolved.clone(),
        None => variant.clone(),
    }
}

/// Keys one union variant contributes to the merged ordering.
fn extract_keys(variant: &Value) -> Vec<String> {
    variant
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| properties.keys().cloned().collect())
        .unwrap_or_default()
}

fn variant_const<'a>(variant: &'a Value, property: &str) -> Option<&'a Value> {
    variant.get("properties")?.get(property)?.get("const")
}
