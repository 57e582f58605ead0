//! Method definitions.

use core::fmt;

use serde::Serialize;

use crate::{Record, Result, Value};

/// The receiver a method borrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// `&self`: callable on the value and the pointer form of an instance.
    Shared,
    /// `&mut self`: callable on the pointer form of an instance only.
    Exclusive,
}

impl Receiver {
    /// The receiver as written in a signature.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Receiver::Shared => "&self",
            Receiver::Exclusive => "&mut self",
        }
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Receiver {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A type-erased method call.
///
/// The function receives the record the method is bound to and the arguments by position, and
/// returns the method's results by position.
#[derive(Clone, Copy)]
pub enum Invoker {
    /// Invoker of a `&self` method.
    Shared(fn(&dyn Record, Vec<Value>) -> Result<Vec<Value>>),
    /// Invoker of a `&mut self` method.
    Exclusive(fn(&mut dyn Record, Vec<Value>) -> Result<Vec<Value>>),
}

impl Invoker {
    /// The receiver the invoked method borrows.
    pub const fn receiver(&self) -> Receiver {
        match self {
            Invoker::Shared(_) => Receiver::Shared,
            Invoker::Exclusive(_) => Receiver::Exclusive,
        }
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invoker::Shared(_) => f.write_str("Invoker::Shared"),
            Invoker::Exclusive(_) => f.write_str("Invoker::Exclusive"),
        }
    }
}

/// The static description of a dynamically callable method.
#[derive(Debug, Clone, Copy)]
pub struct MethodInfo {
    /// The name of the method.
    name: &'static str,
    /// The rendered signature.
    signature: &'static str,
    /// Whether the method is visible outside its type.
    exported: bool,
    /// Whether the last parameter takes the variadic sequence.
    variadic: bool,
    /// The type-erased call.
    invoker: Invoker,
}

impl MethodInfo {
    /// Creates a new unexported, non-variadic method.
    pub const fn new(name: &'static str, signature: &'static str, invoker: Invoker) -> Self {
        Self {
            name,
            signature,
            exported: false,
            variadic: false,
            invoker,
        }
    }

    /// Marks the method as exported.
    pub const fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// Marks the method as variadic.
    pub const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// The name of the method.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The rendered signature.
    pub const fn signature(&self) -> &'static str {
        self.signature
    }

    /// Whether the method is visible outside its type.
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Whether the last parameter takes the variadic sequence.
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// The receiver the method borrows.
    pub const fn receiver(&self) -> Receiver {
        self.invoker.receiver()
    }

    /// The type-erased call.
    pub const fn invoker(&self) -> Invoker {
        self.invoker
    }
}
