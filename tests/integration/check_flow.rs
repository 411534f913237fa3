use std::io::Cursor;

use schemafmt::cmd::check::{CheckCommandArgs, run_with_stdin};
use schemafmt::io::Format;
use serde_json::json;

#[test]
fn check_flow_reports_each_divergent_value_once() {
    let args = CheckCommandArgs {
        input: None,
        from: Some(Format::Jsonl),
        schemas: None,
    };

    let input = "{\"a\":1}\n{\"b\":{\"z\":1,\"a\":2}}\n{\"c\":3,\"a\":1}\n";
    let response = run_with_stdin(&args, Cursor::new(input));

    assert_eq!(response.exit_code, 2);
    assert_eq!(response.payload["mismatch_count"], json!(2));
    assert_eq!(response.payload["mismatches"][0]["path"], json!("$[1].b"));
    assert_eq!(response.payload["mismatches"][1]["path"], json!("$[2]"));
}

#[test]
fn check_flow_accepts_fully_canonical_batches() {
    let args = CheckCommandArgs {
        input: None,
        from: Some(Format::Jsonl),
        schemas: None,
    };

    let input = "{\"a\":1}\n{\"a\":2,\"b\":3}\n";
    let response = run_with_stdin(&args, Cursor::new(input));

    assert_eq!(response.exit_code, 0);
    assert_eq!(response.payload["canonical"], json!(true));
    assert_eq!(response.payload["mismatches"], json!([]));
}
