use std::io::{Read, Write};

use serde_json::Value;

use crate::io::IoError;

pub fn read_json<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(match value {
        Value::Array(items) => items,
        single => vec![single],
    })
}

/// Write values as one JSON document.
///
/// Pretty output uses two-space indentation and ends with a newline, the
/// shape hand-edited corpus files keep on disk.
pub fn write_json<W: Write>(mut writer: W, values: &[Value], pretty: bool) -> Result<(), IoError> {
    if pretty {
        if values.len() == 1 {
            serde_json::to_writer_pretty(&mut writer, &values[0])?;
        } else {
            serde_json::to_writer_pretty(&mut writer, &values)?;
        }
        writer.write_all(b"\n")?;
    } else if values.len() == 1 {
        serde_json::to_writer(writer, &values[0])?;
    } else {
        serde_json::to_writer(writer, values)?;
    }
    Ok(())
}
