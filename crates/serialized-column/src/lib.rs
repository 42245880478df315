//! Serialized columns: store rich values as encoded payloads in text or blob
//! columns, and detect in-place mutation of those values.
//!
//! # Overview
//!
//! A persistence layer usually stores scalars. To keep a map, a list, or a
//! typed record in a single column, this crate wraps the column's primitive
//! type (the *subtype*) and a pluggable *coder*:
//! - **Encode/decode**: values go through the coder and then the subtype
//! - **Default short-circuit**: never-written columns decode to the coder's
//!   default without touching a payload, and untouched defaults are not written
//! - **Change detection**: values mutated in place (no reassignment) are found
//!   by re-encoding them and diffing against the last stored payload
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use serialized_column::{Payload, Serialized, StoreCoder, TextColumn};
//!
//! let column = Serialized::new(TextColumn::new(), StoreCoder::json());
//!
//! // Untouched default: nothing to store
//! assert_eq!(column.serialize(Some(&json!({}))).unwrap(), None);
//!
//! // Save a value, then mutate it in place
//! let stored = column.serialize(Some(&json!({"a": 1}))).unwrap();
//! assert_eq!(stored, Some(Payload::text(r#"{"a":1}"#)));
//!
//! let mut value = column.deserialize(stored.as_ref()).unwrap();
//! assert!(!column.changed_in_place(stored.as_ref(), Some(&value)).unwrap());
//!
//! column.accessor().write(&mut value, "a", json!(2));
//! assert!(column.changed_in_place(stored.as_ref(), Some(&value)).unwrap());
//! ```
//!
//! # Modules
//!
//! - [`serialized`]: The [`Serialized`] adapter
//! - [`coder`]: The [`Coder`] trait, its optional capabilities, and reference coders
//! - [`column`]: The [`ColumnType`] trait with text and binary columns
//! - [`payload`]: Raw text/binary payloads
//! - [`accessor`]: Key-by-key access to decoded stores
//! - [`error`]: Error types
//! - [`limits`]: Size limits for decoding
//!
//! # Errors
//!
//! Coder and subtype failures are returned unchanged; the adapter adds no
//! recovery. A malformed payload fails the read instead of being coerced.

pub mod accessor;
pub mod coder;
pub mod column;
pub mod error;
pub mod limits;
pub mod payload;
pub mod serialized;


// Re-export commonly used types at crate root
pub use accessor::IndifferentHashAccessor;
pub use coder::{
    Coder, ColumnSerializer, JsonCoder, ObjectClass, StoreCoder, TypedJsonCoder, ValidateValue,
    ValueKind, ZstdCoder,
};
pub use column::{BinaryColumn, ColumnType, TextColumn};
pub use error::{Action, DecodeError, EncodeError, Error, ValidationError};
pub use payload::{Payload, TextEncoding};
pub use serialized::Serialized;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
