//! Error types for the composer core.
//!
//! # Design
//! Only a transport that cannot complete the call is an error. Non-2xx
//! statuses and non-JSON bodies are normal outcomes and never show up here.
//! `DraftError` is confined to the string-keyed form handler and never
//! reaches the builder or the executor.

use std::fmt;

use crate::fields::UnknownField;
use crate::http::UnsupportedMethod;

/// The network call could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// Errors returned by `RequestDraft::set_input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The input name is neither `method`, `url` nor a known field.
    UnknownInput(String),

    /// The `method` input named a verb the composer does not offer.
    UnsupportedMethod(String),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::UnknownInput(name) => write!(f, "unknown input: {name}"),
            DraftError::UnsupportedMethod(method) => {
                write!(f, "unsupported HTTP method: {method}")
            }
        }
    }
}

impl std::error::Error for DraftError {}

impl From<UnknownField> for DraftError {
    fn from(err: UnknownField) -> Self {
        DraftError::UnknownInput(err.0)
    }
}

impl From<UnsupportedMethod> for DraftError {
    fn from(err: UnsupportedMethod) -> Self {
        DraftError::UnsupportedMethod(err.0)
    }
}
