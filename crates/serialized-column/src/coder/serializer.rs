//! Type-checking wrapper around any coder.

use std::fmt;

use crate::coder::{Coder, ObjectClass, ValidateValue, ValueKind};
use crate::error::{Action, DecodeError, EncodeError, ValidationError};
use crate::payload::Payload;

/// Wraps a coder with the attribute it serializes and, optionally, the class
/// every non-nil value must belong to.
///
/// With a class set:
/// - a load that yields nil (including an absent column) is replaced by the
///   class's empty instance, if it has one
/// - loaded values are checked with [`Action::Load`], dumped ones with [`Action::Dump`]
/// - the adapter's own check uses [`Action::Serialize`]
///
/// Nil values pass every check and dump to no payload.
pub struct ColumnSerializer<C: Coder> {
    attribute: String,
    coder: C,
    object_class: Option<ObjectClass<C::Value>>,
}

impl<C: Coder> ColumnSerializer<C> {
    /// Creates a serializer for `attribute` with no class restriction.
    pub fn new(attribute: impl Into<String>, coder: C) -> Self {
        Self {
            attribute: attribute.into(),
            coder,
            object_class: None,
        }
    }

    /// Restricts values to `class`.
    pub fn with_object_class(mut self, class: ObjectClass<C::Value>) -> Self {
        self.object_class = Some(class);
        self
    }

    /// Returns the attribute name used in error messages.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the wrapped coder.
    pub fn coder(&self) -> &C {
        &self.coder
    }
}

impl<C> ColumnSerializer<C>
where
    C: Coder,
    C::Value: ValueKind,
{
    fn check(&self, value: &C::Value, action: Action) -> Result<(), ValidationError> {
        let Some(class) = &self.object_class else {
            return Ok(());
        };
        if value.is_nil() || class.is_instance(value) {
            return Ok(());
        }
        Err(ValidationError::TypeMismatch {
            attribute: self.attribute.clone(),
            action,
            expected: class.name(),
            found: value.kind(),
            value: format!("{value:?}"),
        })
    }
}

impl<C> Coder for ColumnSerializer<C>
where
    C: Coder,
    C::Value: ValueKind,
{
    type Value = C::Value;

    fn load(&self, raw: Option<&Payload>) -> Result<C::Value, DecodeError> {
        let value = self.coder.load(raw)?;
        if value.is_nil() {
            if let Some(empty) = self.object_class.and_then(|class| class.instantiate()) {
                return Ok(empty);
            }
        }
        self.check(&value, Action::Load)?;
        Ok(value)
    }

    fn dump(&self, value: &C::Value) -> Result<Option<Payload>, EncodeError> {
        if value.is_nil() {
            return Ok(None);
        }
        self.check(value, Action::Dump)?;
        self.coder.dump(value)
    }

    fn is_nil(&self, value: &C::Value) -> bool {
        value.is_nil()
    }

    fn validator(&self) -> Option<&dyn ValidateValue<C::Value>> {
        Some(self)
    }

    fn object_class(&self) -> Option<ObjectClass<C::Value>> {
        self.object_class
    }
}

impl<C> ValidateValue<C::Value> for ColumnSerializer<C>
where
    C: Coder,
    C::Value: ValueKind,
{
    fn assert_valid_value(&self, value: &C::Value, action: Action) -> Result<(), ValidationError> {
        self.check(value, action)
    }
}

impl<C: Coder + fmt::Debug> fmt::Debug for ColumnSerializer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSerializer")
            .field("attribute", &self.attribute)
            .field("coder", &self.coder)
            .field("object_class", &self.object_class)
            .finish()
    }
}
