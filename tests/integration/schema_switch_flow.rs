use schemafmt::engine::canon::Formatter;
use serde_json::{Value, json};

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .expect("value should be an object")
        .keys()
        .map(String::as_str)
        .collect()
}

#[test]
fn union_variants_registered_as_separate_schemas_are_switched() {
    let mut formatter = Formatter::new();
    formatter
        .add_schema(json!({
            "$id": "./youtube.schema.json",
            "properties": {"type": {"const": "youtube"}, "videoId": {}, "start": {}}
        }))
        .expect("register youtube");
    formatter
        .add_schema(json!({
            "$id": "./book.schema.json",
            "properties": {"type": {"const": "book"}, "title": {}, "page": {}}
        }))
        .expect("register book");
    formatter
        .add_schema(json!({
            "$id": "./reference.schema.json",
            "anyOf": [
                {"$ref": "./youtube.schema.json"},
                {"$ref": "./book.schema.json"}
            ]
        }))
        .expect("register reference");

    let formatted = formatter.format(&json!({
        "$schema": "./reference.schema.json",
        "start": 120,
        "type": "youtube",
        "videoId": "abc123"
    }));
    assert_eq!(keys(&formatted), ["type", "videoId", "start", "$schema"]);
}

#[test]
fn pointer_refs_reach_nested_definitions() {
    let mut formatter = Formatter::new();
    formatter
        .add_schema(json!({
            "$id": "./shared.schema.json",
            "definitions": {
                "quantity": {"properties": {"amount": {}, "unit": {}}}
            }
        }))
        .expect("register shared");
    formatter
        .add_schema(json!({
            "$id": "./recipe.schema.json",
            "properties": {
                "$schema": {},
                "name": {},
                "quantity": {"$ref": "./shared.schema.json#/definitions/quantity"}
            }
        }))
        .expect("register recipe");

    let formatted = formatter.format(&json!({
        "$schema": "./recipe.schema.json",
        "quantity": {"unit": "oz", "amount": 2},
        "name": "test"
    }));
    assert_eq!(keys(&formatted["quantity"]), ["amount", "unit"]);
}

#[test]
fn formatters_own_independent_schema_sets() {
    let mut first = Formatter::new();
    first
        .add_schema(json!({
            "$id": "./t.json",
            "properties": {"$schema": {}, "b": {}, "a": {}}
        }))
        .expect("register in first");
    let second = Formatter::new();

    let input = json!({"$schema": "./t.json", "a": 1, "b": 2});
    let with_schema = first.format(&input);
    let without_schema = second.format(&input);

    assert_eq!(keys(&with_schema), ["$schema", "b", "a"]);
    assert_eq!(keys(&without_schema), ["$schema", "a", "b"]);
}

#[test]
fn deep_documents_combine_every_ordering_rule() {
    let mut formatter = Formatter::new();
    formatter
        .add_schema(json!({
            "$id": "./hop.schema.json",
            "properties": {"name": {}, "grams": {}, "minutes": {}}
        }))
        .expect("register hop");
    formatter
        .add_schema(json!({
            "$id": "./recipe.schema.json",
            "properties": {
                "$schema": {},
                "name": {},
                "hops": {"type": "array", "items": {"$ref": "./hop.schema.json"}},
                "references": {"type": "array", "items": {"anyOf": [
                    {"properties": {"type": {"const": "youtube"}, "videoId": {}, "start": {}}},
                    {"properties": {"type": {"const": "book"}, "title": {}, "page": {}}}
                ]}}
            }
        }))
        .expect("register recipe");

    let formatted = formatter.format(&json!({
        "rating": 5,
        "references": [
            {"page": 12, "type": "book", "title": "Hops"},
            {"start": 30, "videoId": "xyz", "type": "youtube"}
        ],
        "$schema": "./recipe.schema.json",
        "hops": [{"minutes": 60, "grams": 20, "name": "saaz"}],
        "name": "pils"
    }));

    assert_eq!(
        keys(&formatted),
        ["$schema", "name", "hops", "references", "rating"]
    );
    assert_eq!(
        keys(&formatted["hops"][0]),
        ["name", "grams", "minutes"]
    );
    assert_eq!(
        keys(&formatted["references"][0]),
        ["type", "title", "page"]
    );
    assert_eq!(
        keys(&formatted["references"][1]),
        ["type", "videoId", "start"]
    );
}
