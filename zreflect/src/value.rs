//! Owned, type-erased values.

use core::{
    any::{Any, TypeId},
    fmt,
};

use serde::Serialize;

use crate::{Kind, Reflect, Record, Typed};

/// An owned value of any reflected type.
///
/// This is the boxed currency of the crate: field snapshots, assigned values, method arguments
/// and method results are all `Value`s. A `Value` never wraps another `Value`; [`Value::new`]
/// flattens.
///
/// As a declared field or parameter type, `Value` is the interface-like type: it accepts values
/// of any reflected type.
pub struct Value(Box<dyn Reflect>);

impl Value {
    /// Wrap `value`.
    pub fn new<T: Reflect>(value: T) -> Self {
        let value: Box<dyn Reflect> = Box::new(value);
        if (*value).as_any().is::<Value>() {
            if let Ok(value) = value.into_any().downcast::<Value>() {
                return *value;
            }
            unreachable!("checked to be a `Value`");
        }

        Value(value)
    }

    /// The structural category of the held value.
    pub fn kind(&self) -> Kind {
        self.0.kind()
    }

    /// The full name of the type of the held value.
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }

    /// Whether the held value is of type `T`.
    pub fn is<T: Reflect>(&self) -> bool {
        TypeId::of::<T>() == TypeId::of::<Value>() || (*self.0).as_any().is::<T>()
    }

    /// A reference to the held value, if it is of type `T`.
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        let this: &dyn Any = self;
        this.downcast_ref::<T>()
            .or_else(|| (*self.0).as_any().downcast_ref::<T>())
    }

    /// A mutable reference to the held value, if it is of type `T`.
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        if TypeId::of::<T>() == TypeId::of::<Value>() {
            let this: &mut dyn Any = self;
            return this.downcast_mut::<T>();
        }

        (*self.0).as_any_mut().downcast_mut::<T>()
    }

    /// The held value, if it is of type `T`. Otherwise `self` is handed back.
    pub fn downcast<T: Reflect>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }

        let any: Box<dyn Any> = if TypeId::of::<T>() == TypeId::of::<Value>() {
            Box::new(self)
        } else {
            self.0.into_any()
        };
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// The held value as a `dyn Reflect`.
    pub fn as_reflect(&self) -> &dyn Reflect {
        &*self.0
    }

    /// The held value as a mutable `dyn Reflect`.
    pub fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.0
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        self.0.clone_value()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.debug(f)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.to_json().serialize(serializer)
    }
}

impl Reflect for Value {
    fn kind(&self) -> Kind {
        self.0.kind()
    }

    fn clone_value(&self) -> Value {
        self.clone()
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        *self = value;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.debug(f)
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.0.as_record()
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        self.0.as_record_mut()
    }

    fn pointee(&self) -> Option<&dyn Reflect> {
        self.0.pointee()
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.pointee_mut()
    }
}

impl Typed for Value {
    const KIND: Kind = Kind::Dynamic;
}
