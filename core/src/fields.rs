//! Raw form fields and the table that decides how they enter a request body.

use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One of the fixed set of named inputs the composer collects.
///
/// Variants are declared in body order; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Username,
    Password,
    Age,
    AuthKey,
    OwnerId,
    Name,
    Type,
    Role,
}

impl FieldName {
    /// Key used for this field in the JSON body.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Username => "username",
            FieldName::Password => "password",
            FieldName::Age => "age",
            FieldName::AuthKey => "authKey",
            FieldName::OwnerId => "ownerId",
            FieldName::Name => "name",
            FieldName::Type => "type",
            FieldName::Role => "role",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an input name does not match any known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELD_TABLE
            .iter()
            .map(|(name, _)| *name)
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// How a present raw value is turned into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Sent as the string the user typed.
    Verbatim,
    /// Sent as a number when the value parses as an integer, otherwise as
    /// the original string. Integers beyond `i64` become floating-point
    /// numbers.
    Integer,
}

impl Coercion {
    pub fn apply(self, raw: &str) -> Value {
        match self {
            Coercion::Verbatim => Value::String(raw.to_string()),
            Coercion::Integer => match raw.trim().parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(err) if is_overflow(err.kind()) => raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map_or_else(|| Value::String(raw.to_string()), Value::Number),
                Err(_) => Value::String(raw.to_string()),
            },
        }
    }
}

fn is_overflow(kind: &IntErrorKind) -> bool {
    matches!(kind, IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
}

/// Field inclusion table, in body order.
pub const FIELD_TABLE: [(FieldName, Coercion); 8] = [
    (FieldName::Username, Coercion::Verbatim),
    (FieldName::Password, Coercion::Verbatim),
    (FieldName::Age, Coercion::Integer),
    (FieldName::AuthKey, Coercion::Verbatim),
    (FieldName::OwnerId, Coercion::Verbatim),
    (FieldName::Name, Coercion::Verbatim),
    (FieldName::Type, Coercion::Verbatim),
    (FieldName::Role, Coercion::Verbatim),
];

/// User-entered values keyed by field. Missing and empty values are both
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields {
    values: BTreeMap<FieldName, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: FieldName, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// The value for `name`, or `None` when it was never set or is empty.
    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.values
            .get(&name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when no field holds a non-empty value.
    pub fn is_blank(&self) -> bool {
        FIELD_TABLE.iter().all(|(name, _)| self.get(*name).is_none())
    }

    /// Run the inclusion table: keep the non-empty fields and coerce each.
    pub fn to_payload(&self) -> Map<String, Value> {
        FIELD_TABLE
            .iter()
            .filter_map(|(name, coercion)| {
                self.get(*name)
                    .map(|raw| (name.as_str().to_string(), coercion.apply(raw)))
            })
            .collect()
    }
}
