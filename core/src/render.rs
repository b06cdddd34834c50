//! Text helpers for displaying an `Exchange`.

use serde_json::Value;

use crate::outcome::{Exchange, ExchangeOutcome, ResponseData};

/// Badge class for a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Error,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        if (200..300).contains(&status) {
            StatusClass::Success
        } else {
            StatusClass::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Success => "success",
            StatusClass::Error => "error",
        }
    }
}

/// One `name: value` line per header.
pub fn format_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Objects, arrays and null pretty-printed with two-space indentation.
/// Other JSON scalars and text are shown plainly, strings without quotes.
pub fn format_data(data: &ResponseData) -> String {
    match data {
        ResponseData::Json(value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ResponseData::Json(Value::String(text)) | ResponseData::Text(text) => text.clone(),
        ResponseData::Json(scalar) => scalar.to_string(),
    }
}

/// Single-line summary shown above the response.
pub fn summary_line(exchange: &Exchange) -> String {
    match &exchange.outcome {
        ExchangeOutcome::Success(response) => format!(
            "{} {} · {} bytes · {}ms",
            response.status, response.status_text, response.size_bytes, exchange.elapsed_ms
        ),
        ExchangeOutcome::Failure { message } => {
            format!("Error: {message} · {}ms", exchange.elapsed_ms)
        }
    }
}
