//! Read-only accessors over a JSON object.

use serde_json::{Map, Value};

use rustews_model::names;

use crate::error::JsonError;

/// A borrowed view of one JSON object in a reply.
///
/// A key whose value is `null` counts as absent.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Wrap an object map.
    #[must_use]
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// View `value` as an object. `context` names it in the error.
    pub fn from_value(value: &'a Value, context: &str) -> Result<Self, JsonError> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| JsonError::UnexpectedType {
                key: context.to_owned(),
                expected: "an object",
            })
    }

    /// Whether `key` is present with a non-null value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.get(key).is_some_and(|v| !v.is_null())
    }

    /// Raw value of `key`, if present and non-null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, JsonError> {
        self.get(key)
            .ok_or_else(|| JsonError::MissingKey(key.to_owned()))
    }

    /// Read `key` as text. Numbers and booleans are rendered as text.
    pub fn read_as_string(&self, key: &str) -> Result<String, JsonError> {
        match self.require(key)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(JsonError::UnexpectedType {
                key: key.to_owned(),
                expected: "a string",
            }),
        }
    }

    /// Read `key` as text if present.
    pub fn read_optional_string(&self, key: &str) -> Result<Option<String>, JsonError> {
        if self.contains_key(key) {
            self.read_as_string(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read `key` as a boolean. The xs:boolean strings `"true"`, `"false"`,
    /// `"1"` and `"0"` are accepted too.
    pub fn read_as_bool(&self, key: &str) -> Result<bool, JsonError> {
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(JsonError::ParseError(format!(
                    "invalid boolean for {key}: {s}"
                ))),
            },
            _ => Err(JsonError::UnexpectedType {
                key: key.to_owned(),
                expected: "a boolean",
            }),
        }
    }

    /// Read `key` as an array.
    pub fn read_as_array(&self, key: &str) -> Result<&'a [Value], JsonError> {
        self.require(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| JsonError::UnexpectedType {
                key: key.to_owned(),
                expected: "an array",
            })
    }

    /// Read `key` as a nested object.
    pub fn read_as_object(&self, key: &str) -> Result<JsonObject<'a>, JsonError> {
        Self::from_value(self.require(key)?, key)
    }

    /// The `__type` discriminator without its `:#Exchange` suffix.
    #[must_use]
    pub fn type_name(&self) -> Option<&'a str> {
        let raw = self.map.get(names::JSON_TYPE)?.as_str()?;
        Some(raw.strip_suffix(names::JSON_TYPE_SUFFIX).unwrap_or(raw))
    }
}
