//! Schema loading and payload validation
//!
//! The schema is injected through [`SchemaSource`] rather than read from a
//! hidden global path. [`FileSchemaSource`] re-reads its file on every
//! [`SchemaSource::load`], so edits on disk take effect on the next call.
//! [`BundledSchema`] serves the copy compiled into the crate.

use crate::error::{PayloadError, Result};
use crate::types::ParsedEmail;
use serde_json::Value;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the bundled schema inside the package
pub const BUNDLED_SCHEMA_PATH: &str = "schema/email_schema.json";

/// Schema document compiled into the crate
pub const BUNDLED_SCHEMA: &str = include_str!("../schema/email_schema.json");

/// Environment variable naming a schema file to use instead of [`BUNDLED_SCHEMA`]
pub const SCHEMA_PATH_ENV: &str = "EML_PAYLOAD_SCHEMA";

/// Anything able to hand out the current schema document
pub trait SchemaSource {
    fn load(&self) -> Result<Value>;
}

/// In-memory schema, mostly for tests and embedded deployments
impl SchemaSource for Value {
    fn load(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

/// Schema read from a JSON file on every load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSchemaSource {
    fn load(&self) -> Result<Value> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == IoErrorKind::NotFound {
                PayloadError::SchemaNotFound {
                    path: self.path.clone(),
                }
            } else {
                PayloadError::SchemaRead {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        let schema = serde_json::from_str(&raw).map_err(|e| PayloadError::MalformedSchema {
            path: self.path.clone(),
            source: e,
        })?;

        debug!("Loaded schema from {}", self.path.display());
        Ok(schema)
    }
}

/// The [`BUNDLED_SCHEMA`] document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundledSchema;

impl SchemaSource for BundledSchema {
    fn load(&self) -> Result<Value> {
        serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| PayloadError::MalformedSchema {
            path: PathBuf::from(BUNDLED_SCHEMA_PATH),
            source: e,
        })
    }
}

/// Schema selected by the deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredSchema {
    /// File named by `EML_PAYLOAD_SCHEMA`
    File(FileSchemaSource),
    Bundled,
}

impl ConfiguredSchema {
    /// Use `EML_PAYLOAD_SCHEMA` when set and non-empty, the bundled copy otherwise
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var_os(SCHEMA_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map_or(Self::Bundled, |p| Self::File(FileSchemaSource::new(p)))
    }
}

impl SchemaSource for ConfiguredSchema {
    fn load(&self) -> Result<Value> {
        match self {
            Self::File(source) => source.load(),
            Self::Bundled => BundledSchema.load(),
        }
    }
}

/// Load the schema the deployment is configured with
pub fn load_schema() -> Result<Value> {
    ConfiguredSchema::from_env().load()
}

/// Check a payload against a schema document
pub fn validate(payload: &ParsedEmail, schema: &Value) -> Result<()> {
    validate_value(&payload.to_json()?, schema)
}

/// Check an arbitrary JSON value against a schema document.
///
/// Reports the first violation as produced by the validator.
pub fn validate_value(instance: &Value, schema: &Value) -> Result<()> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| PayloadError::InvalidSchema(e.to_string()))?;

    validator
        .validate(instance)
        .map_err(|e| PayloadError::Validation(e.to_string()))
}
