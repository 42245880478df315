//! Plain JSON coder.

use serde_json::Value;

use crate::coder::Coder;
use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

/// Stores any JSON value as UTF-8 text.
///
/// An absent or blank payload loads as `null`. Declares no capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCoder;

impl JsonCoder {
    pub fn new() -> Self {
        Self
    }
}

impl Coder for JsonCoder {
    type Value = Value;

    fn load(&self, raw: Option<&Payload>) -> Result<Value, DecodeError> {
        match raw {
            Some(payload) if !payload.is_blank() => serde_json::from_slice(payload.as_bytes())
                .map_err(|e| DecodeError::Json(e.to_string())),
            _ => Ok(Value::Null),
        }
    }

    fn dump(&self, value: &Value) -> Result<Option<Payload>, EncodeError> {
        let text = serde_json::to_string(value).map_err(|e| EncodeError::Json(e.to_string()))?;
        Ok(Some(Payload::text(text)))
    }

    fn is_nil(&self, value: &Value) -> bool {
        value.is_null()
    }
}
