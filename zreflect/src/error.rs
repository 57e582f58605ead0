use crate::Kind;

/// The Error type for the zreflect crate.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The instance is neither a record nor a pointer-like handle to a record.
    InvalidKind(Kind),
    /// No field with the given name.
    FieldNotFound(String),
    /// No method with the given name.
    MethodNotFound(String),
    /// The field exists but carries no tag with the given key.
    TagNotFound {
        /// The field name.
        field: String,
        /// The tag key.
        tag: String,
    },
    /// The field is unexported or its storage is not addressable.
    NotSettable(String),
    /// The assigned value does not have the declared type of the field.
    TypeMismatch {
        /// The field name.
        field: String,
        /// The declared type of the field.
        expected: &'static str,
        /// The type of the rejected value.
        found: &'static str,
    },
    /// The method exists but is not exported.
    NotExported(String),
    /// Wrong number of arguments passed to a method.
    Arity {
        /// The method name.
        method: &'static str,
        /// The number of parameters the method declares.
        expected: usize,
        /// The number of arguments given.
        given: usize,
    },
    /// An argument does not have the type of the parameter at its position.
    ArgumentType {
        /// The method name.
        method: &'static str,
        /// Zero-based parameter position.
        position: usize,
        /// The declared parameter type.
        expected: &'static str,
        /// The type of the rejected argument.
        found: &'static str,
    },
    /// An invoker was handed a receiver of a different type than it was registered for.
    ReceiverMismatch {
        /// The type the invoker was registered for.
        expected: &'static str,
        /// The type of the receiver it was given.
        found: &'static str,
    },
    /// Error rendering a descriptor as JSON.
    Json(serde_json::Error),
}

impl Error {
    /// Whether this error reports an unknown field, method or tag.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::FieldNotFound(_) | Error::MethodNotFound(_) | Error::TagNotFound { .. }
        )
    }
}

/// The Result type for the zreflect crate.
pub type Result<T> = core::result::Result<T, Error>;

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidKind(kind) => {
                write!(f, "Invalid instance kind `{kind}`, record or record pointer is needed")
            }
            Error::FieldNotFound(name) => write!(f, "Field `{name}` does not exist"),
            Error::MethodNotFound(name) => write!(f, "Method `{name}` does not exist"),
            Error::TagNotFound { field, tag } => {
                write!(f, "Tag `{tag}` does not exist on field `{field}`")
            }
            Error::NotSettable(name) => write!(f, "Field `{name}` is not settable"),
            Error::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "Cannot assign a value of type `{found}` to field `{field}` of type `{expected}`"
            ),
            Error::NotExported(name) => write!(f, "Method `{name}` is not exported"),
            Error::Arity {
                method,
                expected,
                given,
            } => write!(
                f,
                "Method `{method}` takes {expected} argument(s) but {given} were given"
            ),
            Error::ArgumentType {
                method,
                position,
                expected,
                found,
            } => write!(
                f,
                "Argument {position} of method `{method}` must be `{expected}`, got `{found}`"
            ),
            Error::ReceiverMismatch { expected, found } => {
                write!(f, "Receiver of type `{found}` given to a method of `{expected}`")
            }
            Error::Json(e) => write!(f, "Error serializing to JSON: {e}"),
        }
    }
}
