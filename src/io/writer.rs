use std::io::Write;

use serde_json::Value;

use crate::io::format::{json, jsonl};
use crate::io::{Format, IoError};

/// Write values in the requested format; `pretty` only affects `Format::Json`.
pub fn write_values<W: Write>(
    writer: W,
    format: Format,
    values: &[Value],
    pretty: bool,
) -> Result<(), IoError> {
    match format {
        Format::Json => json::write_json(writer, values, pretty),
        Format::Jsonl => jsonl::write_jsonl(writer, values),
    }
}
