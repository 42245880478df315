//! JSON coder for statically typed values.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::coder::{Coder, ObjectClass};
use crate::error::{DecodeError, EncodeError};
use crate::payload::Payload;

/// Stores a serde type `T` as JSON text.
///
/// An absent or blank payload loads as `T::default()`. Declares `T` as its
/// object class, so every loaded value opts into object equality.
pub struct TypedJsonCoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedJsonCoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedJsonCoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedJsonCoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedJsonCoder<T> {}

impl<T> fmt::Debug for TypedJsonCoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedJsonCoder<{}>", std::any::type_name::<T>())
    }
}

impl<T> Coder for TypedJsonCoder<T>
where
    T: Serialize + DeserializeOwned + Default + PartialEq + fmt::Debug,
{
    type Value = T;

    fn load(&self, raw: Option<&Payload>) -> Result<T, DecodeError> {
        match raw {
            Some(payload) if !payload.is_blank() => serde_json::from_slice(payload.as_bytes())
                .map_err(|e| DecodeError::Json(e.to_string())),
            _ => Ok(T::default()),
        }
    }

    fn dump(&self, value: &T) -> Result<Option<Payload>, EncodeError> {
        let text = serde_json::to_string(value).map_err(|e| EncodeError::Json(e.to_string()))?;
        Ok(Some(Payload::text(text)))
    }

    fn object_class(&self) -> Option<ObjectClass<T>> {
        Some(ObjectClass::of())
    }
}
