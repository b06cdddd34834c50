//! The form state a composer UI edits between submissions.

use serde::{Deserialize, Serialize};

use crate::builder::build;
use crate::error::DraftError;
use crate::fields::{FieldName, RawFields};
use crate::http::{HttpMethod, RequestDescriptor};

/// URL the form is pre-filled with.
pub const DEFAULT_URL: &str = "https://prelim-exam.onrender.com/signup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDraft {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub fields: RawFields,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            url: DEFAULT_URL.to_string(),
            fields: RawFields::new(),
        }
    }
}

impl RequestDraft {
    /// Apply a change from the input called `name`: `method`, `url`, or one
    /// of the field names.
    pub fn set_input(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        match name {
            "method" => self.method = value.parse()?,
            "url" => self.url = value.to_string(),
            other => {
                let field: FieldName = other.parse()?;
                self.fields.set(field, value);
            }
        }
        Ok(())
    }

    /// Whether the field inputs are visible for the selected method.
    pub fn shows_body_fields(&self) -> bool {
        self.method.shows_body_fields()
    }

    pub fn to_descriptor(&self) -> RequestDescriptor {
        build(self.method, &self.url, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_a_get_to_signup() {
        let draft = RequestDraft::default();
        assert_eq!(draft.method, HttpMethod::Get);
        assert_eq!(draft.url, DEFAULT_URL);
        assert!(draft.fields.is_blank());
        assert!(!draft.shows_body_fields());
    }

    #[test]
    fn inputs_are_routed_by_name() {
        let mut draft = RequestDraft::default();
        draft.set_input("method", "POST").unwrap();
        draft.set_input("url", "http://localhost/pets").unwrap();
        draft.set_input("ownerId", "9").unwrap();
        assert_eq!(draft.method, HttpMethod::Post);
        assert_eq!(draft.url, "http://localhost/pets");
        assert_eq!(draft.fields.get(FieldName::OwnerId), Some("9"));
        assert!(draft.shows_body_fields());
    }

    #[test]
    fn unknown_input_is_rejected() {
        let mut draft = RequestDraft::default();
        assert_eq!(
            draft.set_input("body", "{}"),
            Err(DraftError::UnknownInput("body".to_string()))
        );
        assert_eq!(
            draft.set_input("method", "TRACE"),
            Err(DraftError::UnsupportedMethod("TRACE".to_string()))
        );
        assert_eq!(draft, RequestDraft::default());
    }

    #[test]
    fn fields_typed_under_post_are_dropped_by_get() {
        let mut draft = RequestDraft::default();
        draft.set_input("method", "POST").unwrap();
        draft.set_input("username", "Smith").unwrap();
        assert!(draft.to_descriptor().body.is_some());
        draft.set_input("method", "GET").unwrap();
        assert!(draft.to_descriptor().body.is_none());
    }

    #[test]
    fn delete_sends_fields_even_though_inputs_are_hidden() {
        let mut draft = RequestDraft::default();
        draft.set_input("name", "Rex").unwrap();
        draft.set_input("method", "DELETE").unwrap();
        assert!(!draft.shows_body_fields());
        assert_eq!(draft.to_descriptor().body.as_deref(), Some(r#"{"name":"Rex"}"#));
    }
}
