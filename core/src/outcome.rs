//! Normalized exchange results.
//!
//! # Design
//! Any completed HTTP response becomes `ExchangeOutcome::Success`, whatever
//! its status. Only a transport that could not complete the call yields
//! `Failure`. A body that is not JSON is kept as text rather than reported as
//! an error, so `ResponseData` forces every consumer to handle both shapes.

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::http::RawResponse;

/// Response body as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum ResponseData {
    /// The body parsed as JSON (object, array, string, number, bool or null).
    Json(Value),
    /// The body text, byte-for-byte, when it is not valid JSON.
    Text(String),
}

impl ResponseData {
    /// Parse `text` as JSON, keeping the raw text when that fails.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseData::Json(value),
            Err(_) => ResponseData::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Json(_) => None,
            ResponseData::Text(text) => Some(text),
        }
    }
}

/// A completed response, 2xx or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub data: ResponseData,
    /// Length of the response text in bytes.
    pub size_bytes: usize,
}

impl ExchangeResponse {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Result of attempting one exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExchangeOutcome {
    Success(ExchangeResponse),
    Failure { message: String },
}

impl ExchangeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeOutcome::Failure { .. })
    }

    pub fn response(&self) -> Option<&ExchangeResponse> {
        match self {
            ExchangeOutcome::Success(response) => Some(response),
            ExchangeOutcome::Failure { .. } => None,
        }
    }
}

/// An outcome together with the wall-clock time the exchange took.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub outcome: ExchangeOutcome,
    pub elapsed_ms: u64,
}

/// Fold a raw response into a `Success` outcome.
pub fn normalize(response: RawResponse) -> ExchangeOutcome {
    let size_bytes = response.body.len();
    let data = ResponseData::from_text(response.body);
    debug!("response status {} ({size_bytes} bytes): {data:?}", response.status);

    ExchangeOutcome::Success(ExchangeResponse {
        status: response.status,
        status_text: response.status_text,
        headers: response.headers,
        data,
        size_bytes,
    })
}
