use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::domain::error::FmtError;
use crate::engine::canon::Formatter;
use crate::io::{Format, reader, writer};

/// Command-level options for canonical formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FmtCommandOptions {
    /// Pretty-print JSON output with two-space indentation.
    pub pretty: bool,
}

/// Register every `*.json` schema document found in `dir`.
///
/// Files load in sorted name order so runs are reproducible. Returns the
/// number of registered documents.
pub fn register_schema_dir(formatter: &mut Formatter, dir: &Path) -> Result<usize, FmtError> {
    let entries = fs::read_dir(dir).map_err(|source| FmtError::SchemaDir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| FmtError::SchemaDir {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    for path in &paths {
        let file = fs::File::open(path).map_err(|source| FmtError::SchemaRead {
            path: path.display().to_string(),
            source,
        })?;
        let document: Value =
            serde_json::from_reader(file).map_err(|source| FmtError::SchemaParse {
                path: path.display().to_string(),
                source,
            })?;
        formatter
            .add_schema(document)
            .map_err(|source| FmtError::SchemaRegister {
                path: path.display().to_string(),
                source,
            })?;
    }
    Ok(paths.len())
}

/// Execute `fmt` from input stream to output stream.
///
/// This function is intentionally thin: it only coordinates I/O and delegates
/// key reordering to the engine layer.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    input_format: Format,
    output_format: Format,
    formatter: &Formatter,
    options: FmtCommandOptions,
) -> Result<(), FmtError> {
    let values =
        reader::read_values(input, input_format).map_err(|source| FmtError::ReadInput {
            format: input_format,
            source,
        })?;
    let formatted: Vec<Value> = values.iter().map(|value| formatter.format(value)).collect();
    writer::write_values(output, output_format, &formatted, options.pretty).map_err(|source| {
        FmtError::WriteOutput {
            format: output_format,
            source,
        }
    })
}

/// Step names reported by `--emit-pipeline`.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "read_values".to_string(),
        "format_values".to_string(),
        "write_values".to_string(),
    ]
}

/// Determinism guarantees reported by `--emit-pipeline`.
pub fn deterministic_guards(options: FmtCommandOptions) -> Vec<String> {
    let mut guards = vec![
        "schema_key_order".to_string(),
        "alphabetical_fallback".to_string(),
        "array_order_preserved".to_string(),
    ];
    if options.pretty {
        guards.push("two_space_indent".to_string());
    }
    guards
}
