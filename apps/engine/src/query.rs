//! Turns a filter draft into the wire request for one backend route.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::errors::SearchError;
use crate::models::filters::FilterDraft;

/// A resume file forwarded to the backend alongside the filters. Bytes are
/// reference-counted so paged and fan-out requests can carry clones cheaply.
#[derive(Debug, Clone)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeAttachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        ResumeAttachment {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Serializes the filter set for one request.
///
/// Only fields with non-empty/non-null values are included; empty string and
/// `None` mean "unset" and are omitted, never sent as literal empty tokens.
/// The effective `limit` is always included so the backend cannot silently
/// default it differently from what the UI displays. `offset` appears only
/// on paged requests.
pub fn serialize_filters(
    draft: &FilterDraft,
    effective_limit: u32,
    offset: Option<u32>,
) -> Map<String, Value> {
    let mut filters = Map::new();
    insert_nonempty(&mut filters, "title_filter", &draft.title);
    insert_nonempty(&mut filters, "advanced_title_filter", &draft.advanced_title);
    insert_nonempty(&mut filters, "description_filter", &draft.description);
    insert_nonempty(&mut filters, "location_filter", &draft.location);
    if let Some(remote) = draft.remote {
        filters.insert("remote".into(), Value::Bool(remote));
    }
    for (key, value) in &draft.extras {
        match value {
            Value::Null => {}
            Value::String(s) if s.is_empty() => {}
            other => {
                filters.insert(key.clone(), other.clone());
            }
        }
    }
    filters.insert("limit".into(), Value::from(effective_limit));
    if let Some(offset) = offset {
        filters.insert("offset".into(), Value::from(offset));
    }
    filters
}

fn insert_nonempty(filters: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        filters.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// Wraps the serialized filters into the compact JSON request body used
/// when no resume is attached.
pub fn json_body(filters: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("filters".into(), Value::Object(filters));
    Value::Object(body)
}

/// Builds the multipart body carrying both the JSON-encoded filter set and
/// the resume binary.
pub fn multipart_body(
    filters: &Map<String, Value>,
    attachment: &ResumeAttachment,
) -> Result<Form, SearchError> {
    let part = Part::bytes(attachment.bytes.to_vec())
        .file_name(attachment.file_name.clone())
        .mime_str("application/pdf")?;
    Ok(Form::new()
        .text("filters", Value::Object(filters.clone()).to_string())
        .part("resume", part))
}
