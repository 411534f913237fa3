use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Value, json};

use crate::cmd::fmt::register_schema_dir;
use crate::domain::report::CheckReport;
use crate::engine::canon::{Formatter, verify};
use crate::io::{self, Format, IoError};

/// Input arguments for check command execution API.
#[derive(Debug, Clone)]
pub struct CheckCommandArgs {
    pub input: Option<PathBuf>,
    pub from: Option<Format>,
    pub schemas: Option<PathBuf>,
}

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

pub fn run_with_stdin<R: Read>(args: &CheckCommandArgs, stdin: R) -> CheckCommandResponse {
    match execute(args, stdin) {
        Ok(report) => report_response(report),
        Err(CommandError::InputUsage(message)) => CheckCommandResponse {
            exit_code: 3,
            payload: json!({
                "error": "input_usage_error",
                "message": message,
            }),
        },
    }
}

fn report_response(report: CheckReport) -> CheckCommandResponse {
    let exit_code = if report.canonical { 0 } else { 2 };
    match serde_json::to_value(&report) {
        Ok(payload) => CheckCommandResponse { exit_code, payload },
        Err(_) => CheckCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": "failed to serialize check report"
            }),
        },
    }
}

fn execute<R: Read>(args: &CheckCommandArgs, stdin: R) -> Result<CheckReport, CommandError> {
    let mut formatter = Formatter::new();
    if let Some(dir) = &args.schemas {
        register_schema_dir(&mut formatter, dir)
            .map_err(|error| CommandError::InputUsage(error.to_string()))?;
    }
    let input_format = io::resolve_input_format(args.from, args.input.as_deref())
        .map_err(map_io_as_input_usage)?;
    let values = load_input_values(args, stdin, input_format)?;
    Ok(verify::verify_values(&formatter, &values))
}

fn load_input_values<R: Read>(
    args: &CheckCommandArgs,
    stdin: R,
    format: Format,
) -> Result<Vec<Value>, CommandError> {
    if let Some(path) = &args.input {
        let file = File::open(path).map_err(|err| {
            CommandError::InputUsage(format!(
                "failed to open input file `{}`: {err}",
                path.display()
            ))
        })?;
        io::reader::read_values(file, format).map_err(map_io_as_input_usage)
    } else {
        io::reader::read_values(stdin, format).map_err(map_io_as_input_usage)
    }
}

fn map_io_as_input_usage(error: IoError) -> CommandError {
    CommandError::InputUsage(error.to_string())
}

enum CommandError {
    InputUsage(String),
}

/// Step names reported by `--emit-pipeline`.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "read_values".to_string(),
        "format_values".to_string(),
        "compare_key_order".to_string(),
    ]
}

/// Determinism guarantees reported by `--emit-pipeline`.
pub fn deterministic_guards() -> Vec<String> {
    vec![
        "schema_key_order".to_string(),
        "alphabetical_fallback".to_string(),
        "first_divergence_paths".to_string(),
    ]
}
