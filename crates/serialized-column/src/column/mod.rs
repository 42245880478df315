//! Primitive column types.
//!
//! A column type knows how raw payloads are stored: text or bytes, an
//! optional size limit, and how to tell whether two raw payloads differ.
//! [`Serialized`](crate::Serialized) wraps one of these as its subtype.

pub mod binary;
pub mod text;

use std::borrow::Cow;

use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

pub use binary::BinaryColumn;
pub use text::TextColumn;

/// A primitive column type operating on raw payloads.
pub trait ColumnType {
    /// Short type name (e.g., "text", "binary").
    fn type_name(&self) -> &'static str;

    /// Returns true if the column stores raw bytes rather than text.
    fn is_binary(&self) -> bool {
        false
    }

    /// Maximum payload size in bytes, if the column declares one.
    fn limit(&self) -> Option<usize> {
        None
    }

    /// Prepares a payload for storage in this column.
    fn serialize(&self, payload: Payload) -> Result<Payload, EncodeError>;

    /// Converts a payload read from storage into this column's native form.
    fn deserialize<'a>(&self, payload: &'a Payload) -> Result<Cow<'a, Payload>, DecodeError>;

    /// Returns true if `raw_new` differs from the previously stored `raw_old`.
    fn changed_in_place(&self, raw_old: Option<&Payload>, raw_new: Option<&Payload>) -> bool;
}

fn check_limit(limit: Option<usize>, len: usize, field: &'static str) -> Result<(), EncodeError> {
    match limit {
        Some(max) if len > max => Err(EncodeError::LengthExceedsLimit { field, len, max }),
        _ => Ok(()),
    }
}
