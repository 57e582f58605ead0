//! The self-registration contract.
//!
//! Rust has no runtime reflection, so every type that takes part in introspection describes
//! itself through the traits in this module:
//!
//! - [`Reflect`] is the object-safe, per-value capability: the dynamic [`Kind`], cloning into a
//!   [`Value`], assignment from a [`Value`], and access to a [`Record`] or the pointee of a
//!   pointer-like value.
//! - [`Typed`] is the static, per-type capability, used for declared field types.
//! - [`Record`] exposes the static [`RecordInfo`] of a record type, the storage of its fields by
//!   declaration index and its method tables.
//!
//! Implementations for standard types live in the submodules. For records use the
//! `Reflect` derive macro and the `methods` attribute macro:
//!
//! ```rust
//! use zreflect::{Reflect, Reflection};
//!
//! #[derive(Clone, Reflect)]
//! #[zreflect(methods)]
//! struct Counter {
//!     pub count: u32,
//! }
//!
//! #[zreflect::methods]
//! impl Counter {
//!     pub fn increment(&mut self, by: u32) -> u32 {
//!         self.count += by;
//!         self.count
//!     }
//! }
//!
//! let mut counter = Counter { count: 1 };
//! let mut reflection = Reflection::new(&mut counter).unwrap();
//! let returns = reflection.call("increment", zreflect::args![2u32]).unwrap();
//! assert_eq!(returns[0].downcast_ref::<u32>(), Some(&3));
//! ```

use core::{any::Any, fmt};

use crate::{info::MethodInfo, Kind, RecordInfo, Value};

/// Type-erased access to a value as [`Any`].
///
/// This is implemented for every `'static` type and only exists so that `dyn Reflect` can be
/// downcast.
pub trait AsAny: Any {
    /// The value as [`Any`].
    fn as_any(&self) -> &dyn Any;
    /// The value as mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// The boxed value as boxed [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    /// The full name of the concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// Dynamic introspection of a value.
///
/// # Implementing
///
/// Use the [`impl_reflect!`](crate::impl_reflect) macro for leaf types that are
/// `Clone + Debug + Serialize`, and the `Reflect` derive macro for records.
pub trait Reflect: AsAny {
    /// The structural category of this value.
    fn kind(&self) -> Kind;

    /// A snapshot of this value.
    fn clone_value(&self) -> Value;

    /// Replace this value with `value`.
    ///
    /// Fails, handing the value back, if it is not of the same type as `self`. `self` is left
    /// untouched in that case.
    fn assign(&mut self, value: Value) -> Result<(), Value>;

    /// Render this value as JSON, for diagnostics.
    fn to_json(&self) -> serde_json::Value;

    /// Format this value for debugging.
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// This value as a record, if it is one.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// This value as a mutable record, if it is one.
    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// The value this one points to, if it is pointer-like.
    fn pointee(&self) -> Option<&dyn Reflect> {
        None
    }

    /// The value this one points to, mutably, if it is pointer-like.
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }
}

impl<'a> fmt::Debug for dyn Reflect + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}

/// Static type information.
///
/// The [`Kind`] of a declared type, independent of any value. [`Value`] declares
/// [`Kind::Dynamic`] while each of its values reports the kind of what it holds.
pub trait Typed: Reflect + Sized {
    /// The structural category of the type.
    const KIND: Kind;
}

/// A record: a struct with named fields.
///
/// This is the capability [`Reflection`](crate::Reflection) operates on. Field indices follow the
/// order of [`RecordInfo::fields`].
pub trait Record: Reflect {
    /// Static description of the record type.
    fn record_info(&self) -> &'static RecordInfo;

    /// The storage of the field at `index`.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// The mutable storage of the field at `index`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// The tables of methods the record can be called with, one per registered `impl` block.
    ///
    /// Tables are merged in order: a later entry replaces an earlier one of the same name and
    /// receiver.
    fn methods(&self) -> &'static [&'static [MethodInfo]] {
        &[]
    }
}

/// Render the exported fields of a record as a JSON object.
pub fn record_to_json(record: &dyn Record) -> serde_json::Value {
    let info = record.record_info();
    let object = info
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_exported())
        .filter_map(|(index, field)| {
            record
                .field(index)
                .map(|value| (field.name().to_string(), value.to_json()))
        })
        .collect();

    serde_json::Value::Object(object)
}

/// Render a serializable value as JSON.
///
/// A value that fails to serialize is rendered as `null` and the failure logged.
#[doc(hidden)]
pub fn serialize_to_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(
                "Failed to render a `{}` as JSON: {e}",
                core::any::type_name::<T>()
            );
            serde_json::Value::Null
        }
    }
}

/// Format all fields of a record for debugging.
pub fn record_debug(record: &dyn Record, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let info = record.record_info();
    let mut s = f.debug_struct(info.name());
    for (index, field) in info.fields().iter().enumerate() {
        if let Some(value) = record.field(index) {
            s.field(field.name(), &value);
        }
    }
    s.finish()
}

#[macro_use]
mod macros;

mod collections;
mod external;
mod primitives;
mod wrappers;

#[cfg(test)]
mod tests;
