//! Upload pipeline: input checks, extraction and validation in one call

use crate::error::{PayloadError, Result};
use crate::parser::extract;
use crate::schema::{SchemaSource, validate};
use crate::types::ParsedEmail;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::debug;

/// Filename suffix accepted for uploads, compared case-insensitively
pub const EML_EXTENSION: &str = ".eml";

/// Reject uploads that can never yield a payload
pub fn check_upload(filename: &str, bytes: &[u8]) -> Result<()> {
    if !has_eml_extension(filename) {
        return Err(PayloadError::UnsupportedFileType(filename.to_string()));
    }
    if bytes.is_empty() {
        return Err(PayloadError::EmptyUpload);
    }
    Ok(())
}

fn has_eml_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(EML_EXTENSION)
}

/// Check, extract and validate an uploaded message.
///
/// The schema is loaded before extraction so a misconfigured deployment
/// fails the same way regardless of the uploaded content.
pub fn parse_upload(
    filename: &str,
    bytes: &[u8],
    schema: &impl SchemaSource,
) -> Result<ParsedEmail> {
    check_upload(filename, bytes)?;
    let schema = schema.load()?;
    let payload = extract(bytes);
    validate(&payload, &schema)?;
    debug!("Accepted upload {filename} ({} bytes)", bytes.len());
    Ok(payload)
}

/// Extract and validate a message stored on local disk.
///
/// The filename is checked before anything is read.
pub fn parse_eml_file(path: impl AsRef<Path>, schema: &impl SchemaSource) -> Result<ParsedEmail> {
    let path = path.as_ref();
    let filename = path.to_string_lossy();
    if !has_eml_extension(&filename) {
        return Err(PayloadError::UnsupportedFileType(filename.into_owned()));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == IoErrorKind::NotFound {
            PayloadError::FileNotFound(path.to_path_buf())
        } else {
            PayloadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_upload(&filename, &bytes, schema)
}
