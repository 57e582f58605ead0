//! Static descriptions of record types, their fields and their methods.
//!
//! All types here are const-constructible so that implementations of [`Record`](crate::Record)
//! can keep them in `static`s.

#![deny(missing_docs)]

mod record;
pub use record::RecordInfo;

mod field;
pub use field::FieldInfo;

mod tags;
pub use tags::Tags;

mod method;
pub use method::{Invoker, MethodInfo, Receiver};
