//! Reflect implementations for wrapper types.
//!
//! `Option` is reflected as an optional value, `Box` as a pointer-like handle whose pointee can
//! be reached through [`Reflect::pointee`].

use core::fmt;

use crate::{Kind, Reflect, Typed, Value};

// ============================================================================
// Optional type
// ============================================================================

impl<T: Reflect + Clone> Reflect for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Option
    }

    fn clone_value(&self) -> Value {
        Value::new(self.clone())
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        *self = value.downcast::<Self>()?;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Some(value) => value.to_json(),
            None => serde_json::Value::Null,
        }
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&(value as &dyn Reflect)).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T: Reflect + Clone> Typed for Option<T> {
    const KIND: Kind = Kind::Option;
}

// ============================================================================
// Owning pointer
// ============================================================================

impl<T: Reflect + Clone> Reflect for Box<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn clone_value(&self) -> Value {
        Value::new(self.clone())
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        *self = value.downcast::<Self>()?;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        (**self).to_json()
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).debug(f)
    }

    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }
}

impl<T: Reflect + Clone> Typed for Box<T> {
    const KIND: Kind = Kind::Pointer;
}
