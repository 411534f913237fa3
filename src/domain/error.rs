use thiserror::Error;

use crate::io::{Format, IoError};

/// Errors produced by schema registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The document has no usable `$id` to register it under.
    #[error("schema must declare an identifier")]
    MissingIdentifier,
}

/// Errors produced by the `fmt` command boundary.
#[derive(Debug, Error)]
pub enum FmtError {
    /// The schema directory could not be listed.
    #[error("failed to read schema directory `{path}`: {source}")]
    SchemaDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// One schema file could not be opened.
    #[error("failed to open schema file `{path}`: {source}")]
    SchemaRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// One schema file did not contain valid JSON.
    #[error("failed to parse schema file `{path}`: {source}")]
    SchemaParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// One schema document failed registration.
    #[error("failed to register schema file `{path}`: {source}")]
    SchemaRegister {
        path: String,
        #[source]
        source: RegistryError,
    },

    /// Input could not be parsed in the declared format.
    #[error("failed to read {format} input: {source}")]
    ReadInput {
        format: Format,
        #[source]
        source: IoError,
    },

    /// Output could not be serialized in the declared format.
    #[error("failed to write {format} output: {source}")]
    WriteOutput {
        format: Format,
        #[source]
        source: IoError,
    },
}
