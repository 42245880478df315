//! Binary (blob) column.

use std::borrow::Cow;

use crate::column::{ColumnType, check_limit};
use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

/// A column that stores raw bytes.
///
/// Storage always hands back [`Payload::Binary`]. Change detection uses
/// tag-aware equality, so callers must normalize fresh payloads with
/// [`Payload::into_binary`] before comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryColumn {
    limit: Option<usize>,
}

impl BinaryColumn {
    /// Creates an unbounded binary column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a binary column that rejects payloads longer than `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

impl ColumnType for BinaryColumn {
    fn type_name(&self) -> &'static str {
        "binary"
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn serialize(&self, payload: Payload) -> Result<Payload, EncodeError> {
        check_limit(self.limit, payload.len(), "binary column")?;
        Ok(payload.into_binary())
    }

    fn deserialize<'a>(&self, payload: &'a Payload) -> Result<Cow<'a, Payload>, DecodeError> {
        match payload {
            Payload::Binary(_) => Ok(Cow::Borrowed(payload)),
            Payload::Text { .. } => Ok(Cow::Owned(payload.to_binary())),
        }
    }

    fn changed_in_place(&self, raw_old: Option<&Payload>, raw_new: Option<&Payload>) -> bool {
        raw_old != raw_new
    }
}
