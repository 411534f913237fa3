use std::io::Cursor;

use schemafmt::io::Format;
use schemafmt::io::reader::read_values;
use schemafmt::io::writer::write_values;
use serde_json::json;

#[test]
fn json_roundtrip() {
    let values = vec![json!({"a": 1}), json!({"a": 2})];
    let mut out = Vec::new();
    write_values(&mut out, Format::Json, &values, false).expect("write json");
    let read_back = read_values(Cursor::new(out), Format::Json).expect("read json");
    assert_eq!(read_back, values);
}

#[test]
fn pretty_json_roundtrip() {
    let values = vec![json!({"a": {"b": 1}, "c": [1, 2]})];
    let mut out = Vec::new();
    write_values(&mut out, Format::Json, &values, true).expect("write json");
    let read_back = read_values(Cursor::new(out), Format::Json).expect("read json");
    assert_eq!(read_back, values);
}

#[test]
fn jsonl_roundtrip() {
    let values = vec![json!({"a": 1}), json!({"a": 2})];
    let mut out = Vec::new();
    write_values(&mut out, Format::Jsonl, &values, false).expect("write jsonl");
    let read_back = read_values(Cursor::new(out), Format::Jsonl).expect("read jsonl");
    assert_eq!(read_back, values);
}
