//! Error types for serialized column encoding, decoding and validation.

use std::fmt;

use thiserror::Error;

/// The operation during which a coder validated a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// The adapter is about to serialize the value for storage.
    Serialize,
    /// A coder just decoded the value from a payload.
    Load,
    /// A coder is about to encode the value into a payload.
    Dump,
}

impl Action {
    /// Returns the action name as used in error messages (e.g., "serialize").
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Serialize => "serialize",
            Action::Load => "load",
            Action::Dump => "dump",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error while turning a stored payload back into an in-memory value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed JSON payload: {0}")]
    Json(String),

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("zstd decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("expected {expected} payload, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error while turning an in-memory value into a storable payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("value cannot be encoded as JSON: {0}")]
    Json(String),

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("zstd compression failed: {0}")]
    CompressionFailed(String),

    #[error("expected {expected} value, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A coder rejected a value for the attribute it serializes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("can't {action} `{attribute}`: was supposed to be a {expected}, but was a {found} -- {value}")]
    TypeMismatch {
        attribute: String,
        action: Action,
        expected: &'static str,
        found: &'static str,
        value: String,
    },
}

/// Any failure surfaced by the adapter.
///
/// Returned by adapter operations that may both decode and encode: `serialize`
/// and `changed_in_place` consult the coder's `load(None)` before dumping, and
/// [`cast`] runs a full round trip. The inner error is carried unchanged.
///
/// [`cast`]: crate::Serialized::cast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = ValidationError::TypeMismatch {
            attribute: "preferences".to_string(),
            action: Action::Serialize,
            expected: "object",
            found: "array",
            value: "[1,2]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "can't serialize `preferences`: was supposed to be a object, but was a array -- [1,2]"
        );
    }

    #[test]
    fn test_validation_passes_through_unchanged() {
        let inner = ValidationError::TypeMismatch {
            attribute: "settings".to_string(),
            action: Action::Load,
            expected: "object",
            found: "string",
            value: "\"x\"".to_string(),
        };
        let decode: DecodeError = inner.clone().into();
        assert_eq!(decode.to_string(), inner.to_string());
        assert!(matches!(decode, DecodeError::Validation(ref v) if *v == inner));
    }
}
