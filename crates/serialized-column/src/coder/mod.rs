//! Coders: the pluggable encode/decode step of a serialized column.
//!
//! A [`Coder`] turns payloads into values (`load`) and back (`dump`). Two
//! capabilities are optional and declared by the coder itself:
//! - [`Coder::validator`]: a hook that rejects values unsuitable for the coder
//! - [`Coder::object_class`]: the concrete kind of value `load` produces

pub mod compressed;
pub mod json;
pub mod serializer;
pub mod store;
pub mod typed;

use std::any::type_name;
use std::fmt;

use crate::error::{Action, DecodeError, EncodeError, ValidationError};
use crate::payload::Payload;

pub use compressed::ZstdCoder;
pub use json::JsonCoder;
pub use serializer::ColumnSerializer;
pub use store::StoreCoder;
pub use typed::TypedJsonCoder;

/// Encodes values into payloads and decodes them back.
///
/// Coders must be pure: `load(None)` has to return an equal value on every
/// call, because the adapter recomputes the default sentinel from it on each
/// check instead of caching it.
pub trait Coder {
    /// The in-memory value type produced by `load`.
    type Value: PartialEq + fmt::Debug;

    /// Decodes a payload. `None` stands for an absent column and must yield
    /// the coder's default value without failing.
    fn load(&self, raw: Option<&Payload>) -> Result<Self::Value, DecodeError>;

    /// Encodes a value. `Ok(None)` means the value has no payload.
    fn dump(&self, value: &Self::Value) -> Result<Option<Payload>, EncodeError>;

    /// Returns true if `value` is the coder's nil. Nil values are never
    /// encoded and never count as changed in place.
    fn is_nil(&self, _value: &Self::Value) -> bool {
        false
    }

    /// Returns the coder's validation hook, if it has one.
    fn validator(&self) -> Option<&dyn ValidateValue<Self::Value>> {
        None
    }

    /// Returns the concrete kind of value `load` produces, if the coder declares one.
    fn object_class(&self) -> Option<ObjectClass<Self::Value>> {
        None
    }
}

/// Optional validation capability of a coder.
pub trait ValidateValue<V> {
    /// Fails if `value` cannot be handled by the coder for `action`.
    fn assert_valid_value(&self, value: &V, action: Action) -> Result<(), ValidationError>;
}

/// Describes the dynamic shape of a value, for error messages and nil checks.
pub trait ValueKind {
    /// Name of the value's kind (e.g., "object", "array").
    fn kind(&self) -> &'static str;

    /// Returns true for the value's null form.
    fn is_nil(&self) -> bool {
        false
    }
}

impl ValueKind for serde_json::Value {
    fn kind(&self) -> &'static str {
        match self {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }

    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

/// The concrete kind of value a coder produces.
///
/// Holds a name, an instance check, and optionally a constructor for the
/// class's empty instance (used when loading an absent column).
pub struct ObjectClass<V> {
    name: &'static str,
    matches: fn(&V) -> bool,
    instantiate: Option<fn() -> V>,
}

impl<V> ObjectClass<V> {
    /// Creates a class from a name and an instance check.
    pub fn new(name: &'static str, matches: fn(&V) -> bool) -> Self {
        Self {
            name,
            matches,
            instantiate: None,
        }
    }

    /// Sets the constructor for the class's empty instance.
    pub fn with_instantiate(mut self, instantiate: fn() -> V) -> Self {
        self.instantiate = Some(instantiate);
        self
    }

    /// Returns the class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if `value` is an instance of this class.
    pub fn is_instance(&self, value: &V) -> bool {
        (self.matches)(value)
    }

    /// Builds the class's empty instance, if the class has a constructor.
    pub fn instantiate(&self) -> Option<V> {
        self.instantiate.map(|f| f())
    }
}

impl<V: Default> ObjectClass<V> {
    /// The class of a statically typed value: every `V` is an instance, and
    /// `V::default()` is the empty instance.
    pub fn of() -> Self {
        Self {
            name: type_name::<V>(),
            matches: |_: &V| true,
            instantiate: Some(V::default as fn() -> V),
        }
    }
}

impl ObjectClass<serde_json::Value> {
    /// JSON objects; the empty instance is `{}`.
    pub fn json_object() -> Self {
        Self::new("object", serde_json::Value::is_object)
            .with_instantiate(|| serde_json::Value::Object(serde_json::Map::new()))
    }

    /// JSON arrays; the empty instance is `[]`.
    pub fn json_array() -> Self {
        Self::new("array", serde_json::Value::is_array)
            .with_instantiate(|| serde_json::Value::Array(Vec::new()))
    }
}

impl<V> Clone for ObjectClass<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ObjectClass<V> {}

impl<V> fmt::Debug for ObjectClass<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectClass")
            .field("name", &self.name)
            .field("instantiable", &self.instantiate.is_some())
            .finish()
    }
}
