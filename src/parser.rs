//! Message extractor: raw `.eml` bytes to a [`ParsedEmail`]

use crate::types::{Body, Headers, ParsedEmail};
use mailparse::{MailHeaderMap, MailParseError, ParsedMail};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Extract the structured payload from raw message bytes.
///
/// Never fails: input the underlying parser cannot make sense of yields a
/// payload with null headers and empty bodies.
#[must_use]
pub fn extract(raw: &[u8]) -> ParsedEmail {
    payload_from(mailparse::parse_mail(raw))
}

fn payload_from(parsed: Result<ParsedMail<'_>, MailParseError>) -> ParsedEmail {
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Message could not be parsed, emitting empty payload: {e}");
            return ParsedEmail::new(Headers::default(), Body::default());
        }
    };

    let headers = extract_headers(&parsed);
    let body = extract_body(&parsed);

    debug!(
        subject = headers.subject.as_deref().unwrap_or(""),
        multipart = is_multipart(&parsed),
        has_text = body.has_text(),
        has_html = body.has_html(),
        "Extracted email payload"
    );

    ParsedEmail::new(headers, body)
}

fn extract_headers(parsed: &ParsedMail) -> Headers {
    let headers = &parsed.headers;
    Headers {
        from: headers.get_first_value("From"),
        to: headers.get_first_value("To"),
        subject: headers.get_first_value("Subject"),
        date: headers.get_first_value("Date"),
        other_headers: BTreeMap::new(),
    }
}

const fn is_multipart(parsed: &ParsedMail) -> bool {
    !parsed.subparts.is_empty()
}

fn extract_body(parsed: &ParsedMail) -> Body {
    if is_multipart(parsed) {
        return BodySelection::fold(flatten_parts(parsed)).into();
    }

    let part = MessagePart::new(parsed);
    if part.content_type == "text/html" {
        Body {
            text: String::new(),
            html: part.content,
        }
    } else {
        Body {
            text: part.content,
            html: String::new(),
        }
    }
}

/// One node of a message tree, as seen by body selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePart {
    /// Lowercased MIME type, e.g. `text/plain`
    pub content_type: String,

    /// Raw `Content-Disposition` value, empty when the header is absent
    pub disposition: String,

    /// Decoded content of a leaf part, empty for containers or on decode failure
    pub content: String,
}

impl MessagePart {
    #[must_use]
    pub fn new(mail: &ParsedMail) -> Self {
        let content = if is_multipart(mail) {
            String::new()
        } else {
            mail.get_body().unwrap_or_default()
        };
        Self {
            content_type: mail.ctype.mimetype.to_lowercase(),
            disposition: mail
                .headers
                .get_first_value("Content-Disposition")
                .unwrap_or_default(),
            content,
        }
    }

    /// Whether the disposition marks this part as an attachment
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.disposition.to_lowercase().contains("attachment")
    }

    fn is_embedded_message(&self) -> bool {
        self.content_type == "message/rfc822" && !self.is_attachment()
    }
}

/// Flatten a message tree in depth-first pre-order, root container first.
///
/// An inline `message/rfc822` part is followed by the flattened parts of
/// the message it carries.
#[must_use]
pub fn flatten_parts(mail: &ParsedMail) -> Vec<MessagePart> {
    let root = MessagePart::new(mail);
    let embedded = root.is_embedded_message();
    let mut parts = vec![root];

    if embedded {
        parts.extend(flatten_embedded(mail));
    }
    for sub in &mail.subparts {
        parts.extend(flatten_parts(sub));
    }
    parts
}

fn flatten_embedded(mail: &ParsedMail) -> Vec<MessagePart> {
    let raw = match mail.get_body_raw() {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Embedded message could not be decoded: {e}");
            return Vec::new();
        }
    };
    match mailparse::parse_mail(&raw) {
        Ok(inner) => flatten_parts(&inner),
        Err(e) => {
            warn!("Embedded message could not be parsed: {e}");
            Vec::new()
        }
    }
}

/// First-match-wins choice of text and HTML bodies
///
/// A slot counts as taken once it holds non-empty content, so an empty
/// leading part does not shadow a later one of the same type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySelection {
    pub text: String,
    pub html: String,
}

impl BodySelection {
    /// Reduce an ordered part sequence, skipping attachments
    #[must_use]
    pub fn fold(parts: impl IntoIterator<Item = MessagePart>) -> Self {
        parts
            .into_iter()
            .filter(|part| !part.is_attachment())
            .fold(Self::default(), Self::offer)
    }

    fn offer(mut self, part: MessagePart) -> Self {
        match part.content_type.as_str() {
            "text/plain" if self.text.is_empty() => self.text = part.content,
            "text/html" if self.html.is_empty() => self.html = part.content,
            _ => {}
        }
        self
    }
}

impl From<BodySelection> for Body {
    fn from(selection: BodySelection) -> Self {
        Self {
            text: selection.text,
            html: selection.html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_error_yields_empty_payload() {
        let email = payload_from(Err(MailParseError::Generic("unreadable header block")));

        assert_eq!(email.headers, Headers::default());
        assert_eq!(email.body, Body::default());
        assert!(email.urls.is_empty());
        assert!(email.has_placeholder_id());
    }
}
