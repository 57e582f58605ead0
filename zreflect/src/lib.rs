#![deny(
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod log;

mod error;
pub use error::{Error, Result};
mod kind;
pub use kind::Kind;
mod value;
pub use value::Value;
mod reflect;
pub use reflect::{record_debug, record_to_json, AsAny, Record, Reflect, Typed};
pub mod info;
pub use info::{FieldInfo, Invoker, MethodInfo, Receiver, RecordInfo, Tags};
pub mod call;
pub use call::Args;
mod reflection;
pub use reflection::{
    BoundMethod, FieldDescriptor, FieldMut, Instance, MethodDescriptor, Reflection,
};

/// Derive the [`Reflect`], [`Typed`] and [`Record`] implementations of a struct.
pub use zreflect_macros::Reflect;

/// Register the methods of an inherent or trait `impl` block for dynamic calls.
pub use zreflect_macros::methods;

#[doc(hidden)]
pub mod __private {
    pub use crate::reflect::serialize_to_json;
    pub use serde_json;
}
