//! Text column.

use std::borrow::Cow;

use crate::column::{ColumnType, check_limit};
use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

/// A column that stores text.
///
/// Binary payloads are accepted when they hold valid UTF-8. Change detection
/// compares content only, so the same text under a different encoding label
/// is not a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextColumn {
    limit: Option<usize>,
}

impl TextColumn {
    /// Creates an unbounded text column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text column that rejects payloads longer than `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

impl ColumnType for TextColumn {
    fn type_name(&self) -> &'static str {
        "text"
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn serialize(&self, payload: Payload) -> Result<Payload, EncodeError> {
        let text = payload
            .into_text()
            .map_err(|_| EncodeError::InvalidUtf8 { field: "text column" })?;
        check_limit(self.limit, text.len(), "text column")?;
        Ok(text)
    }

    fn deserialize<'a>(&self, payload: &'a Payload) -> Result<Cow<'a, Payload>, DecodeError> {
        match payload {
            Payload::Text { .. } => Ok(Cow::Borrowed(payload)),
            Payload::Binary(_) => payload
                .as_str()
                .map(|s| Cow::Owned(Payload::text(s)))
                .ok_or(DecodeError::InvalidUtf8 { field: "text column" }),
        }
    }

    fn changed_in_place(&self, raw_old: Option<&Payload>, raw_new: Option<&Payload>) -> bool {
        raw_old.map(Payload::as_bytes) != raw_new.map(Payload::as_bytes)
    }
}
