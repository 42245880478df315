//! The serializing column adapter.
//!
//! [`Serialized`] decorates a primitive [`ColumnType`] with a [`Coder`], so a
//! text or blob column can hold a rich value. It owns three things, all fixed
//! at construction: the subtype, the coder, and the configured default.
//!
//! The coder's `load(None)` value is the *default sentinel*: what a column
//! that was never written decodes to. The adapter uses it to
//! - skip decoding for absent columns,
//! - skip writing a payload for untouched defaults (when no explicit default
//!   is configured),
//! - treat the sentinel as having no raw form during change detection.

use tracing::trace;

use crate::accessor::IndifferentHashAccessor;
use crate::coder::Coder;
use crate::column::ColumnType;
use crate::error::{Action, DecodeError, Error, ValidationError};
use crate::payload::Payload;

/// A column type that stores coder-encoded values in a primitive column.
#[derive(Debug)]
pub struct Serialized<S, C: Coder> {
    subtype: S,
    coder: C,
    default: Option<C::Value>,
}

impl<S: ColumnType, C: Coder> Serialized<S, C> {
    /// Creates an adapter with no configured default.
    pub fn new(subtype: S, coder: C) -> Self {
        Self {
            subtype,
            coder,
            default: None,
        }
    }

    /// Sets the column's configured default.
    ///
    /// With a default configured, an untouched sentinel value is written out
    /// as a payload instead of being skipped.
    pub fn with_default(mut self, default: C::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns the wrapped primitive column type.
    pub fn subtype(&self) -> &S {
        &self.subtype
    }

    /// Returns the coder.
    pub fn coder(&self) -> &C {
        &self.coder
    }

    /// Returns the configured default, if any.
    pub fn configured_default(&self) -> Option<&C::Value> {
        self.default.as_ref()
    }

    /// Decodes a payload read from storage.
    ///
    /// An absent payload is the raw form of the default sentinel: it returns
    /// the sentinel without touching the subtype or decoding anything.
    pub fn deserialize(&self, raw: Option<&Payload>) -> Result<C::Value, DecodeError> {
        let Some(raw) = raw else {
            trace!(column = self.subtype.type_name(), "absent payload, using default sentinel");
            return self.coder.load(None);
        };
        let primitive = self.subtype.deserialize(raw)?;
        self.coder.load(Some(&*primitive))
    }

    /// Encodes a value for storage.
    ///
    /// Returns `None` for a nil value (absent, or nil per [`Coder::is_nil`]),
    /// and for the default sentinel when no explicit default is configured.
    /// A coder that cannot produce its sentinel fails the call with the
    /// [`DecodeError`] from `load(None)`.
    pub fn serialize(&self, value: Option<&C::Value>) -> Result<Option<Payload>, Error> {
        let Some(value) = self.non_nil(value) else {
            return Ok(None);
        };
        if self.default.is_none() && self.is_default_value(value)? {
            trace!(column = self.subtype.type_name(), "default sentinel, skipping payload");
            return Ok(None);
        }
        match self.coder.dump(value)? {
            Some(payload) => Ok(Some(self.subtype.serialize(payload)?)),
            None => Ok(None),
        }
    }

    /// Returns true if `value` no longer matches the previously stored `raw_old`.
    ///
    /// A nil value is never reported as changed in place. Otherwise the value
    /// is re-encoded and compared against `raw_old`: a payload present on only
    /// one side is a change, and the subtype decides when both are present.
    pub fn changed_in_place(
        &self,
        raw_old: Option<&Payload>,
        value: Option<&C::Value>,
    ) -> Result<bool, Error> {
        let Some(value) = self.non_nil(value) else {
            return Ok(false);
        };
        let raw_new = self.encoded(value)?;
        let changed = raw_old.is_none() != raw_new.is_none()
            || self.subtype.changed_in_place(raw_old, raw_new.as_ref());
        trace!(column = self.subtype.type_name(), changed, "checked for in-place change");
        Ok(changed)
    }

    /// Runs the coder's validation hook for serialization, if it has one.
    pub fn assert_valid_value(&self, value: &C::Value) -> Result<(), ValidationError> {
        match self.coder.validator() {
            Some(validator) => validator.assert_valid_value(value, Action::Serialize),
            None => Ok(()),
        }
    }

    /// Returns true if the coder declares an object class and `value` is an
    /// instance of it. Such values are compared as decoded objects rather than
    /// by raw payload.
    pub fn force_equality(&self, value: &C::Value) -> bool {
        self.coder
            .object_class()
            .is_some_and(|class| class.is_instance(value))
    }

    /// Returns the accessor for key-by-key access to the decoded value.
    pub fn accessor(&self) -> IndifferentHashAccessor {
        IndifferentHashAccessor
    }

    /// Normalizes a value to the form it would take after a save and reload.
    pub fn cast(&self, value: Option<&C::Value>) -> Result<C::Value, Error> {
        let raw = self.serialize(value)?;
        Ok(self.deserialize(raw.as_ref())?)
    }

    /// Serialized values can be mutated in place.
    pub fn is_mutable(&self) -> bool {
        true
    }

    /// Forwarded from the subtype.
    pub fn type_name(&self) -> &'static str {
        self.subtype.type_name()
    }

    /// Forwarded from the subtype.
    pub fn is_binary(&self) -> bool {
        self.subtype.is_binary()
    }

    /// Forwarded from the subtype.
    pub fn limit(&self) -> Option<usize> {
        self.subtype.limit()
    }

    fn non_nil<'v>(&self, value: Option<&'v C::Value>) -> Option<&'v C::Value> {
        value.filter(|v| !self.coder.is_nil(v))
    }

    /// Returns true if `value` equals the coder's default sentinel.
    ///
    /// The sentinel is recomputed on every call.
    fn is_default_value(&self, value: &C::Value) -> Result<bool, DecodeError> {
        Ok(*value == self.coder.load(None)?)
    }

    /// Encodes `value` for change detection.
    ///
    /// The sentinel has no raw form. On binary columns a text payload is
    /// converted to bytes so that equal content compares equal whatever its
    /// encoding label.
    fn encoded(&self, value: &C::Value) -> Result<Option<Payload>, Error> {
        if self.is_default_value(value)? {
            return Ok(None);
        }
        let payload = match self.coder.dump(value)? {
            Some(payload) if self.subtype.is_binary() && !payload.is_binary() => {
                trace!(encoding = ?payload.encoding(), "normalizing text payload to binary");
                Some(payload.into_binary())
            }
            other => other,
        };
        Ok(payload)
    }
}
