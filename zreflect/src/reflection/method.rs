//! Method descriptors.

use core::{fmt, ops::Deref};

use serde::{ser::SerializeStruct, Serialize};

use crate::{
    info::{Invoker, MethodInfo, Receiver},
    Error, Kind, Record, Result, Value,
};

/// One dynamically callable method of an introspected instance.
#[derive(Debug, Clone, Copy)]
pub struct MethodDescriptor {
    info: &'static MethodInfo,
}

impl MethodDescriptor {
    pub(super) fn new(info: &'static MethodInfo) -> Self {
        Self { info }
    }

    /// The name of the method.
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    /// The rendered signature of the method.
    pub fn signature(&self) -> &'static str {
        self.info.signature()
    }

    /// Always [`Kind::Function`].
    pub fn kind(&self) -> Kind {
        Kind::Function
    }

    /// The receiver the method borrows.
    pub fn receiver(&self) -> Receiver {
        self.info.receiver()
    }

    /// Whether the method can be called from outside its type.
    pub fn is_exported(&self) -> bool {
        self.info.is_exported()
    }

    /// Whether the last parameter takes the variadic sequence.
    pub fn is_variadic(&self) -> bool {
        self.info.is_variadic()
    }
}

impl Serialize for MethodDescriptor {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Method", 6)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("signature", self.signature())?;
        s.serialize_field("kind", &self.kind())?;
        s.serialize_field("receiver", &self.receiver())?;
        s.serialize_field("exported", &self.is_exported())?;
        s.serialize_field("variadic", &self.is_variadic())?;
        s.end()
    }
}

/// The record a method is bound to.
pub(super) enum Bound<'r> {
    Shared(&'r dyn Record),
    Exclusive(&'r mut dyn Record),
}

/// A method descriptor bound to the introspected instance.
pub struct BoundMethod<'r> {
    descriptor: &'r MethodDescriptor,
    record: Bound<'r>,
}

impl<'r> BoundMethod<'r> {
    pub(super) fn new(descriptor: &'r MethodDescriptor, record: Bound<'r>) -> Self {
        Self { descriptor, record }
    }

    /// Call the method with `args`, matched by position.
    ///
    /// A variadic method takes its trailing sequence as one `Vec` argument.
    pub fn call(&mut self, args: Vec<Value>) -> Result<Vec<Value>> {
        let name = self.descriptor.name();
        if !self.descriptor.is_exported() {
            debug!("Method `{name}` is not exported");
            return Err(Error::NotExported(name.to_string()));
        }
        trace!("Calling method `{name}` with {} argument(s)", args.len());

        match (self.descriptor.info.invoker(), &mut self.record) {
            (Invoker::Shared(invoke), Bound::Shared(record)) => invoke(*record, args),
            (Invoker::Shared(invoke), Bound::Exclusive(record)) => invoke(&**record, args),
            (Invoker::Exclusive(invoke), Bound::Exclusive(record)) => invoke(&mut **record, args),
            // `&mut self` methods are only registered for exclusive borrows.
            (Invoker::Exclusive(_), Bound::Shared(_)) => {
                Err(Error::MethodNotFound(name.to_string()))
            }
        }
    }

    /// Like [`BoundMethod::call`] but panics on failure.
    #[track_caller]
    pub fn must_call(&mut self, args: Vec<Value>) -> Vec<Value> {
        self.call(args).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The descriptor of the method.
    pub fn descriptor(&self) -> &'r MethodDescriptor {
        self.descriptor
    }
}

impl Deref for BoundMethod<'_> {
    type Target = MethodDescriptor;

    fn deref(&self) -> &Self::Target {
        self.descriptor
    }
}

impl fmt::Debug for BoundMethod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = match &self.record {
            Bound::Shared(record) => record.record_info().name(),
            Bound::Exclusive(record) => record.record_info().name(),
        };
        f.debug_struct("BoundMethod")
            .field("descriptor", self.descriptor)
            .field("record", &record)
            .finish()
    }
}
