use serde_json::Value;

/// Find the property that tags a union's variants.
///
/// A property qualifies when the first variant declares a literal `const`
/// for it and every other variant also declares a `const` (of any value)
/// for a property of the same name. The first qualifying property in the
/// first variant's declaration order wins, which keeps detection stable.
pub fn find_discriminator(variants: &[Value]) -> Option<String> {
    let (first, rest) = variants.split_first()?;
    let properties = first.get("properties")?.as_object()?;

    for (name, property) in properties {
        if property.get("const").is_none() {
            continue;
        }
        let shared = rest.iter().all(|variant| {
            variant
                .get("properties")
                .and_then(|properties| properties.get(name))
                .and_then(|property| property.get("const"))
                .is_some()
        });
        if shared {
            return Some(name.clone());
        }
    }
    None
}
