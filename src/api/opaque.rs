//! Opaque JSON values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A JSON value whose shape varies between accounts and is never interpreted.
///
/// An absent field and an explicit `null` are kept apart so re-encoding
/// reproduces the original document: absent values are skipped (pair the
/// field with `skip_serializing_if = "OpaqueValue::is_absent"`), everything
/// else is written back as decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpaqueValue(Option<Value>);

impl OpaqueValue {
    /// Returns `true` if the field was missing from the payload.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Returns `true` if the field was missing or `null`.
    pub fn is_null(&self) -> bool {
        matches!(self.0, None | Some(Value::Null))
    }

    /// The raw decoded value, if the field was present.
    pub fn raw(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

impl From<Value> for OpaqueValue {
    fn from(value: Value) -> Self {
        Self(Some(value))
    }
}

impl<'de> Deserialize<'de> for OpaqueValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self(Some(value)))
    }
}

impl Serialize for OpaqueValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}
