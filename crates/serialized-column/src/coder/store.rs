//! Keyed store coder.
//!
//! Backs attributes that hold a string-keyed map (settings, preferences) and
//! are read and written key by key through
//! [`IndifferentHashAccessor`](crate::accessor::IndifferentHashAccessor).

use serde_json::{Map, Value};

use crate::coder::{Coder, JsonCoder, ValueKind};
use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

/// Wraps a JSON-valued coder so the attribute is always an object.
///
/// An absent payload, or one that decodes to `null`, loads as `{}`. Any other
/// non-object payload is rejected rather than silently replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCoder<C = JsonCoder> {
    inner: C,
}

impl StoreCoder<JsonCoder> {
    /// A store persisted as plain JSON text.
    pub fn json() -> Self {
        Self { inner: JsonCoder }
    }
}

impl<C> StoreCoder<C> {
    /// A store persisted through `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Returns the wrapped coder.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Coder<Value = Value>> Coder for StoreCoder<C> {
    type Value = Value;

    fn load(&self, raw: Option<&Payload>) -> Result<Value, DecodeError> {
        match self.inner.load(raw)? {
            Value::Null => Ok(Value::Object(Map::new())),
            object @ Value::Object(_) => Ok(object),
            other => Err(DecodeError::UnexpectedShape {
                expected: "object",
                found: other.kind(),
            }),
        }
    }

    fn dump(&self, value: &Value) -> Result<Option<Payload>, EncodeError> {
        if !value.is_object() {
            return Err(EncodeError::UnexpectedShape {
                expected: "object",
                found: value.kind(),
            });
        }
        self.inner.dump(value)
    }

    fn is_nil(&self, value: &Value) -> bool {
        self.inner.is_nil(value)
    }
}
