//! Field access over a decoded JSON object with explicit required/optional rules.

use dadabot_core::error::MalformedPayload;
use serde_json::{Map, Value};
use tracing::debug;

/// Borrowed view of one entity's JSON object.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(entity: &'static str, value: &'a Value) -> Result<Self, MalformedPayload> {
        match value.as_object() {
            Some(map) => Ok(Self { entity, map }),
            None => Err(MalformedPayload::wrong_type(entity, "(payload)", "an object")),
        }
    }

    /// Field value, treating JSON `null` as absent.
    pub(crate) fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    /// Integer field; integer-valued strings are accepted.
    pub(crate) fn required_i64(&self, field: &'static str) -> Result<i64, MalformedPayload> {
        let value = self
            .get(field)
            .ok_or_else(|| MalformedPayload::missing(self.entity, field))?;
        coerce_i64(value)
            .ok_or_else(|| MalformedPayload::wrong_type(self.entity, field, "an integer"))
    }

    pub(crate) fn required_str(&self, field: &'static str) -> Result<String, MalformedPayload> {
        let value = self
            .get(field)
            .ok_or_else(|| MalformedPayload::missing(self.entity, field))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MalformedPayload::wrong_type(self.entity, field, "a string"))
    }

    /// Nested object that must be present.
    pub(crate) fn required_object(&self, field: &'static str) -> Result<&'a Value, MalformedPayload> {
        self.get(field)
            .ok_or_else(|| MalformedPayload::missing(self.entity, field))
    }

    pub(crate) fn optional_i64(&self, field: &str, default: i64) -> i64 {
        match self.get(field) {
            None => default,
            Some(v) => coerce_i64(v).unwrap_or_else(|| {
                debug!("{}.{field} is not an integer, using {default}", self.entity);
                default
            }),
        }
    }

    pub(crate) fn optional_str(&self, field: &str) -> String {
        match self.get(field) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                debug!("{}.{field} is not a string, using empty", self.entity);
                String::new()
            }
        }
    }

    pub(crate) fn optional_bool(&self, field: &str) -> bool {
        match self.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        }
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
