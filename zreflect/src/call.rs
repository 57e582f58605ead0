//! The call mechanism behind method invokers.
//!
//! Arguments are matched strictly by position: the number of arguments must equal the number of
//! parameters and every argument must have the exact parameter type. There is no implicit
//! collection of trailing arguments into a variadic parameter. The caller passes the variadic
//! sequence as one already assembled `Vec`.

use core::any::type_name;

use crate::{Error, Record, Reflect, Result, Value};

/// Positional arguments of one method call.
#[derive(Debug)]
pub struct Args {
    method: &'static str,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Args {
    /// Check that `values` holds exactly `expected` arguments for `method`.
    pub fn new(method: &'static str, values: Vec<Value>, expected: usize) -> Result<Self> {
        if values.len() != expected {
            return Err(Error::Arity {
                method,
                expected,
                given: values.len(),
            });
        }

        Ok(Self {
            method,
            values: values.into_iter(),
            position: 0,
        })
    }

    /// Take the next argument as a `T`.
    // Not an `Iterator`: every call can ask for a different type.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: Reflect>(&mut self) -> Result<T> {
        let position = self.position;
        let value = self.values.next().ok_or(Error::Arity {
            method: self.method,
            expected: position + 1,
            given: position,
        })?;
        self.position += 1;

        value.downcast::<T>().map_err(|value| Error::ArgumentType {
            method: self.method,
            position,
            expected: type_name::<T>(),
            found: value.type_name(),
        })
    }
}

/// Downcast the receiver handed to an invoker.
pub fn receiver<T: Record>(record: &dyn Record) -> Result<&T> {
    let found = (*record).type_name();
    record
        .as_any()
        .downcast_ref::<T>()
        .ok_or(Error::ReceiverMismatch {
            expected: type_name::<T>(),
            found,
        })
}

/// Downcast the mutable receiver handed to an invoker.
pub fn receiver_mut<T: Record>(record: &mut dyn Record) -> Result<&mut T> {
    let found = (*record).type_name();
    record
        .as_any_mut()
        .downcast_mut::<T>()
        .ok_or(Error::ReceiverMismatch {
            expected: type_name::<T>(),
            found,
        })
}

/// Pack method arguments into a `Vec<Value>`.
///
/// ```rust
/// let args = zreflect::args!["name", 42u8, vec![1.5f64]];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[1].downcast_ref::<u8>(), Some(&42));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::new($arg)),+]
    };
}
