use chrono::{DateTime, Utc};
use eml_payload::*;
use serde_json::json;

// --- ParsedEmail ---

#[test]
fn test_new_payload_defaults() {
    let email = ParsedEmail::new(Headers::default(), Body::default());

    assert_eq!(email.schema_version, "1.0.0");
    assert_eq!(email.email_id, PLACEHOLDER_EMAIL_ID);
    assert!(email.has_placeholder_id());
    assert!(email.urls.is_empty());
    assert!(email.attachments.is_empty());
    assert_eq!(email.metadata.parser_version, "0.1.0");
}

#[test]
fn test_placeholder_fields_listed() {
    assert!(ParsedEmail::PLACEHOLDER_FIELDS.contains(&"email_id"));
    assert!(ParsedEmail::PLACEHOLDER_FIELDS.contains(&"urls"));
    assert!(ParsedEmail::PLACEHOLDER_FIELDS.contains(&"attachments"));
    assert!(ParsedEmail::PLACEHOLDER_FIELDS.contains(&"headers.other_headers"));
}

#[test]
fn test_json_shape() {
    let headers = Headers {
        from: Some("a@x.com".into()),
        subject: Some("Hi".into()),
        ..Headers::default()
    };
    let body = Body {
        text: "Hello".into(),
        html: String::new(),
    };
    let value = ParsedEmail::new(headers, body).to_json().unwrap();

    assert_eq!(value["schema_version"], "1.0.0");
    assert_eq!(value["email_id"], "123456");
    assert_eq!(
        value["headers"],
        json!({
            "from": "a@x.com",
            "to": null,
            "subject": "Hi",
            "date": null,
            "other_headers": {}
        })
    );
    assert_eq!(value["body"], json!({"text": "Hello", "html": ""}));
    assert_eq!(value["urls"], json!([]));
    assert_eq!(value["attachments"], json!([]));
    assert_eq!(value["metadata"]["parser_version"], "0.1.0");
}

// --- Metadata ---

#[test]
fn test_timestamp_has_explicit_offset() {
    let value = ParsedEmail::new(Headers::default(), Body::default())
        .to_json()
        .unwrap();
    let ts = value["metadata"]["timestamp"].as_str().unwrap();

    assert!(ts.ends_with("+00:00"));
    assert!(DateTime::parse_from_rfc3339(ts).is_ok());
}

#[test]
fn test_timestamp_is_extraction_time() {
    let before = Utc::now();
    let email = extract(b"From: a@x.com\r\n\r\nHello");
    let after = Utc::now();

    assert!(email.metadata.timestamp >= before);
    assert!(email.metadata.timestamp <= after);
}

#[test]
fn test_payload_deserializes_back() {
    let email = extract(b"From: a@x.com\r\nSubject: Hi\r\n\r\nHello");
    let json = serde_json::to_string(&email).unwrap();
    let back: ParsedEmail = serde_json::from_str(&json).unwrap();

    assert_eq!(back.headers, email.headers);
    assert_eq!(back.body, email.body);
    assert_eq!(
        back.metadata.timestamp.timestamp_micros(),
        email.metadata.timestamp.timestamp_micros()
    );
}

// --- Body ---

#[test]
fn test_body_presence() {
    let body = Body {
        text: String::new(),
        html: "<p>x</p>".into(),
    };
    assert!(!body.has_text());
    assert!(body.has_html());
}

// --- ErrorKind ---

#[test]
fn test_error_kind_status_codes() {
    assert_eq!(ErrorKind::Configuration.status_code(), 500);
    assert_eq!(ErrorKind::Validation.status_code(), 422);
    assert_eq!(ErrorKind::Input.status_code(), 400);
    assert_eq!(ErrorKind::NotFound.status_code(), 404);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        PayloadError::EmptyUpload.to_string(),
        "Uploaded file was empty"
    );
    assert_eq!(
        PayloadError::Validation("'x' is a required property".into()).to_string(),
        "Schema validation failed: 'x' is a required property"
    );
}
