use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use schemafmt::cmd::{check, fmt};
use schemafmt::domain::error::FmtError;
use schemafmt::domain::report::{PipelineInput, PipelineInputSource, PipelineReport};
use schemafmt::engine::canon::Formatter;
use schemafmt::io::{Format, IoError};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(
    name = "schemafmt",
    version,
    about = "Schema-driven JSON key-order canonicalizer"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    emit_pipeline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reorder object keys to canonical schema order.
    Fmt(FmtArgs),
    /// Report values that are not in canonical key order.
    Check(CheckArgs),
}

#[derive(Debug, clap::Args)]
struct FmtArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    schemas: Option<PathBuf>,

    #[arg(long, value_enum)]
    from: CliFormat,

    #[arg(long, value_enum)]
    to: Option<CliFormat>,

    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Rewrite the input file in place instead of writing to stdout.
    #[arg(long, default_value_t = false)]
    write: bool,
}

#[derive(Debug, clap::Args)]
struct CheckArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    schemas: Option<PathBuf>,

    #[arg(long, value_enum)]
    from: Option<CliFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Json,
    Jsonl,
}

impl From<CliFormat> for Format {
    fn from(value: CliFormat) -> Self {
        match value {
            CliFormat::Json => Self::Json,
            CliFormat::Jsonl => Self::Jsonl,
        }
    }
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let emit_pipeline = cli.emit_pipeline;
    match cli.command {
        Commands::Fmt(args) => run_fmt(args, emit_pipeline),
        Commands::Check(args) => run_check(args, emit_pipeline),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_fmt(args: FmtArgs, emit_pipeline: bool) -> i32 {
    let input_format: Format = args.from.into();
    let output_format = args.to.map(Into::into).unwrap_or(input_format);
    let options = fmt::FmtCommandOptions {
        pretty: args.pretty,
    };
    let pipeline_report = build_fmt_pipeline_report(&args, input_format, options);

    let mut formatter = Formatter::new();
    if let Some(dir) = &args.schemas {
        if let Err(error) = fmt::register_schema_dir(&mut formatter, dir) {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"command": "fmt", "schemas": dir}),
                3,
            );
            return 3;
        }
    }

    let exit_code = if args.write {
        run_fmt_write(&args, input_format, output_format, &formatter, options)
    } else {
        run_fmt_stream(&args, input_format, output_format, &formatter, options)
    };

    if emit_pipeline {
        emit_pipeline_report(&pipeline_report);
    }
    exit_code
}

fn run_fmt_stream(
    args: &FmtArgs,
    input_format: Format,
    output_format: Format,
    formatter: &Formatter,
    options: fmt::FmtCommandOptions,
) -> i32 {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    if let Some(path) = &args.input {
        match File::open(path) {
            Ok(file) => match fmt::run(
                file,
                &mut output,
                input_format,
                output_format,
                formatter,
                options,
            ) {
                Ok(()) => 0,
                Err(error) => emit_fmt_error(&error),
            },
            Err(err) => {
                emit_error(
                    "input_usage_error",
                    format!("failed to open input file `{}`: {err}", path.display()),
                    json!({"command": "fmt", "input": path}),
                    3,
                );
                3
            }
        }
    } else {
        let stdin = io::stdin();
        match fmt::run(
            stdin.lock(),
            &mut output,
            input_format,
            output_format,
            formatter,
            options,
        ) {
            Ok(()) => 0,
            Err(error) => emit_fmt_error(&error),
        }
    }
}

fn run_fmt_write(
    args: &FmtArgs,
    input_format: Format,
    output_format: Format,
    formatter: &Formatter,
    options: fmt::FmtCommandOptions,
) -> i32 {
    let Some(path) = &args.input else {
        emit_error(
            "input_usage_error",
            "--write requires --input".to_string(),
            json!({"command": "fmt"}),
            3,
        );
        return 3;
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            emit_error(
                "input_usage_error",
                format!("failed to open input file `{}`: {err}", path.display()),
                json!({"command": "fmt", "input": path}),
                3,
            );
            return 3;
        }
    };

    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    let mut staged = match tempfile::NamedTempFile::new_in(parent.unwrap_or(Path::new("."))) {
        Ok(staged) => staged,
        Err(err) => {
            emit_error(
                "internal_error",
                format!("failed to stage rewrite of `{}`: {err}", path.display()),
                json!({"command": "fmt", "input": path}),
                1,
            );
            return 1;
        }
    };

    match fmt::run(
        file,
        &mut staged,
        input_format,
        output_format,
        formatter,
        options,
    ) {
        Ok(()) => match staged.persist(path) {
            Ok(_) => 0,
            Err(err) => {
                emit_error(
                    "internal_error",
                    format!("failed to replace `{}`: {err}", path.display()),
                    json!({"command": "fmt", "input": path}),
                    1,
                );
                1
            }
        },
        Err(error) => emit_fmt_error(&error),
    }
}

fn run_check(args: CheckArgs, emit_pipeline: bool) -> i32 {
    let input = args.input.clone();
    let input_format = input
        .as_deref()
        .map(|path| schemafmt::io::resolve_input_format(None, Some(path)).ok())
        .unwrap_or(Some(Format::Json));
    let pipeline_report = build_check_pipeline_report(&args, input_format);
    let command_args = check::CheckCommandArgs {
        input: input.clone(),
        from: if input.is_some() {
            args.from.map(Into::into)
        } else {
            Some(args.from.map(Into::into).unwrap_or(Format::Json))
        },
        schemas: args.schemas,
    };

    let stdin = io::stdin();
    let response = check::run_with_stdin(&command_args, stdin.lock());

    let exit_code = match response.exit_code {
        0 | 2 => {
            if emit_json_stdout(&response.payload) {
                response.exit_code
            } else {
                emit_error(
                    "internal_error",
                    "failed to serialize check response".to_string(),
                    json!({"command": "check"}),
                    1,
                );
                1
            }
        }
        3 | 1 => {
            if emit_json_stderr(&response.payload) {
                response.exit_code
            } else {
                emit_error(
                    "internal_error",
                    "failed to serialize check error".to_string(),
                    json!({"command": "check"}),
                    1,
                );
                1
            }
        }
        other => {
            emit_error(
                "internal_error",
                format!("unexpected check exit code: {other}"),
                json!({"command": "check"}),
                1,
            );
            1
        }
    };

    if emit_pipeline {
        emit_pipeline_report(&pipeline_report);
    }
    exit_code
}

fn emit_fmt_error(error: &FmtError) -> i32 {
    let (exit_code, error_kind) = map_fmt_error(error);
    emit_error(
        error_kind,
        error.to_string(),
        json!({"command": "fmt"}),
        exit_code,
    );
    exit_code
}

fn map_fmt_error(error: &FmtError) -> (i32, &'static str) {
    match error {
        FmtError::SchemaDir { .. }
        | FmtError::SchemaRead { .. }
        | FmtError::SchemaParse { .. }
        | FmtError::SchemaRegister { .. }
        | FmtError::ReadInput { .. } => (3, "input_usage_error"),
        FmtError::WriteOutput { source, .. } => match source {
            IoError::Io(_) => (1, "internal_error"),
            _ => (3, "input_usage_error"),
        },
    }
}

fn build_fmt_pipeline_report(
    args: &FmtArgs,
    input_format: Format,
    options: fmt::FmtCommandOptions,
) -> PipelineReport {
    let mut sources = Vec::with_capacity(2);
    if let Some(dir) = &args.schemas {
        sources.push(PipelineInputSource::path(
            "schemas",
            dir.display().to_string(),
            Some("json"),
        ));
    }
    if let Some(path) = &args.input {
        sources.push(PipelineInputSource::path(
            "input",
            path.display().to_string(),
            Some(input_format.as_str()),
        ));
    } else {
        sources.push(PipelineInputSource::stdin(
            "input",
            Some(input_format.as_str()),
        ));
    }
    PipelineReport::new(
        "fmt",
        PipelineInput::new(sources),
        fmt::pipeline_steps(),
        fmt::deterministic_guards(options),
    )
}

fn build_check_pipeline_report(args: &CheckArgs, input_format: Option<Format>) -> PipelineReport {
    let mut sources = Vec::with_capacity(2);
    if let Some(dir) = &args.schemas {
        sources.push(PipelineInputSource::path(
            "schemas",
            dir.display().to_string(),
            Some("json"),
        ));
    }
    if let Some(path) = &args.input {
        sources.push(PipelineInputSource::path(
            "input",
            path.display().to_string(),
            format_label(input_format),
        ));
    } else {
        sources.push(PipelineInputSource::stdin(
            "input",
            format_label(input_format),
        ));
    }
    PipelineReport::new(
        "check",
        PipelineInput::new(sources),
        check::pipeline_steps(),
        check::deterministic_guards(),
    )
}

fn format_label(format: Option<Format>) -> Option<&'static str> {
    format.map(Format::as_str)
}

fn emit_json_stdout(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            println!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_json_stderr(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            eprintln!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
