// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Payload Extractor
//!
//! Turns a raw `.eml` message into a small, normalized JSON payload and
//! checks it against a JSON Schema before handing it back.
//!
//! # Features
//!
//! - Lenient MIME decomposition that never rejects a message
//! - First-match-wins selection of text and HTML bodies, skipping attachments
//! - Injectable schema sources (file on disk or in-memory document)
//! - Error kinds that separate deployment problems from bad input
//!
//! # Example
//!
//! ```rust
//! use eml_payload::{extract, validate, BundledSchema, SchemaSource};
//!
//! let raw = b"From: a@x.com\r\nSubject: Hi\r\n\r\nHello";
//! let payload = extract(raw);
//!
//! assert_eq!(payload.headers.subject.as_deref(), Some("Hi"));
//! assert_eq!(payload.body.text, "Hello");
//!
//! let schema = BundledSchema.load().unwrap();
//! validate(&payload, &schema).unwrap();
//! ```

mod error;
mod parser;
mod schema;
mod types;
mod upload;

pub use error::{ErrorKind, PayloadError, Result};
pub use parser::{BodySelection, MessagePart, extract, flatten_parts};
pub use schema::{
    BUNDLED_SCHEMA, BUNDLED_SCHEMA_PATH, BundledSchema, ConfiguredSchema, FileSchemaSource,
    SCHEMA_PATH_ENV, SchemaSource, load_schema, validate, validate_value,
};
pub use types::*;
pub use upload::{EML_EXTENSION, check_upload, parse_eml_file, parse_upload};
