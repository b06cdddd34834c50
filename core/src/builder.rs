//! Turns a method, a URL and sparse form fields into a `RequestDescriptor`.
//!
//! # Design
//! Building never fails and never performs I/O. The URL is passed through
//! untouched; a malformed one surfaces later as a transport failure. The body
//! is method-gated: GET drops every field, the other verbs send the non-empty
//! fields as a JSON object, and an empty object is never sent.

use log::debug;
use serde_json::Value;

use crate::fields::RawFields;
use crate::http::{HttpMethod, RequestDescriptor};

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// Build the descriptor for one submission.
pub fn build(method: HttpMethod, url: &str, fields: &RawFields) -> RequestDescriptor {
    let body = if method.allows_body() {
        encode_payload(fields)
    } else {
        None
    };

    debug!(
        "built {method} {url} with body {}",
        body.as_deref().unwrap_or("<none>")
    );

    RequestDescriptor {
        method,
        url: url.to_string(),
        headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        body,
    }
}

fn encode_payload(fields: &RawFields) -> Option<String> {
    let payload = fields.to_payload();
    if payload.is_empty() {
        return None;
    }
    // A map of strings and integers always serializes.
    Some(Value::Object(payload).to_string())
}
