//! Payload types produced by the extractor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the payload shape, bumped together with the bundled schema
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Version of this extractor as stamped into `metadata.parser_version`
pub const PARSER_VERSION: &str = "0.1.0";

/// Constant stand-in for `email_id`.
///
/// Not derived from message content and not unique; callers must not use it
/// for deduplication.
pub const PLACEHOLDER_EMAIL_ID: &str = "123456";

/// Normalized view of a single email message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    /// Payload shape version, always [`SCHEMA_VERSION`]
    pub schema_version: String,

    /// Identifier of the message, currently [`PLACEHOLDER_EMAIL_ID`]
    pub email_id: String,

    pub headers: Headers,

    pub body: Body,

    /// URLs found in the body. Not extracted yet, always empty.
    pub urls: Vec<String>,

    /// Attachment descriptors. Not collected yet, always empty.
    pub attachments: Vec<Attachment>,

    pub metadata: Metadata,
}

impl ParsedEmail {
    /// Fields that are emitted but never populated by the current extractor
    pub const PLACEHOLDER_FIELDS: [&'static str; 4] =
        ["email_id", "urls", "attachments", "headers.other_headers"];

    /// Assemble a payload around the given headers and body, stamped now
    #[must_use]
    pub fn new(headers: Headers, body: Body) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            email_id: PLACEHOLDER_EMAIL_ID.to_string(),
            headers,
            body,
            urls: Vec::new(),
            attachments: Vec::new(),
            metadata: Metadata::now(),
        }
    }

    /// Whether `email_id` is still the constant placeholder
    #[must_use]
    pub fn has_placeholder_id(&self) -> bool {
        self.email_id == PLACEHOLDER_EMAIL_ID
    }

    /// JSON value handed to callers and to the validator
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Selected message headers, verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,

    /// Remaining headers. Not collected yet, always empty.
    pub other_headers: BTreeMap<String, String>,
}

/// Text and HTML renditions of the message body
///
/// Each is an empty string when the message has no such rendition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub text: String,
    pub html: String,
}

impl Body {
    #[must_use]
    pub const fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    #[must_use]
    pub const fn has_html(&self) -> bool {
        !self.html.is_empty()
    }
}

/// Descriptor for an attached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: Option<String>,
    pub content_type: String,
    pub size: usize,
}

/// Extraction bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub parser_version: String,

    /// Moment of extraction, serialized as RFC 3339 with a `+00:00` offset
    #[serde(with = "rfc3339_offset")]
    pub timestamp: DateTime<Utc>,
}

impl Metadata {
    #[must_use]
    pub fn now() -> Self {
        Self {
            parser_version: PARSER_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

mod rfc3339_offset {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
