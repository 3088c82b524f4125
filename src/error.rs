//! Error types for payload extraction and validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing a validated payload
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Schema file does not exist at the configured path
    #[error("Schema file not found: {}", path.display())]
    SchemaNotFound { path: PathBuf },

    /// Schema file exists but could not be read
    #[error("Failed to read schema file {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema file is not valid JSON
    #[error("Schema file is not valid JSON: {source}")]
    MalformedSchema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Schema document is JSON but not a usable JSON Schema
    #[error("Schema document is not a valid JSON Schema: {0}")]
    InvalidSchema(String),

    /// Extracted payload does not conform to the schema
    #[error("Schema validation failed: {0}")]
    Validation(String),

    /// Uploaded file carried no bytes
    #[error("Uploaded file was empty")]
    EmptyUpload,

    /// Uploaded file does not have the .eml extension
    #[error("Please upload a .eml file (got {0:?})")]
    UnsupportedFileType(String),

    /// Local message file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Local message file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be converted to JSON
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Broad classification of a [`PayloadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Deployment misconfiguration, surfaced as a server-side error
    Configuration,
    /// The extracted payload does not match the expected shape
    Validation,
    /// The caller supplied unusable input
    Input,
    /// The caller named a message file that does not exist
    NotFound,
}

impl ErrorKind {
    /// HTTP status a hosting layer should answer with
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Configuration => 500,
            Self::Validation => 422,
            Self::Input => 400,
            Self::NotFound => 404,
        }
    }
}

impl PayloadError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SchemaNotFound { .. }
            | Self::SchemaRead { .. }
            | Self::MalformedSchema { .. }
            | Self::InvalidSchema(_)
            | Self::Serialize(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::EmptyUpload | Self::UnsupportedFileType(_) | Self::FileRead { .. } => {
                ErrorKind::Input
            }
            Self::FileNotFound(_) => ErrorKind::NotFound,
        }
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }
}

/// Result type for payload operations
pub type Result<T> = std::result::Result<T, PayloadError>;
