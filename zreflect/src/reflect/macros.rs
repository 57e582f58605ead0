//! Macros for implementing the Reflect trait.

/// Implements [`Reflect`](crate::Reflect) and [`Typed`](crate::Typed) for leaf types.
///
/// The types must implement `Clone`, `Debug` and `serde::Serialize`. Values are snapshotted by
/// cloning, assigned only from values of the exact same type, and rendered as JSON through their
/// `Serialize` implementation.
///
/// # Examples
///
/// ```rust
/// use zreflect::{impl_reflect, Kind, Reflect, Value};
///
/// #[derive(Clone, Debug, serde::Serialize)]
/// struct UserId(u64);
///
/// // Single type
/// impl_reflect!(UserId => Kind::Opaque);
///
/// let id = Value::new(UserId(7));
/// assert_eq!(id.kind(), Kind::Opaque);
/// assert_eq!(id.to_json(), serde_json::json!(7));
/// ```
///
/// Multiple types sharing a kind can be listed at once:
///
/// ```ignore
/// impl_reflect!(i8, i16, i32, i64 => Kind::Int);
/// ```
#[macro_export]
macro_rules! impl_reflect {
    ($($ty:ty),+ => $kind:expr) => {
        $(
            impl $crate::Reflect for $ty {
                fn kind(&self) -> $crate::Kind {
                    $kind
                }

                fn clone_value(&self) -> $crate::Value {
                    $crate::Value::new(::core::clone::Clone::clone(self))
                }

                fn assign(
                    &mut self,
                    value: $crate::Value,
                ) -> ::core::result::Result<(), $crate::Value> {
                    *self = value.downcast::<Self>()?;
                    ::core::result::Result::Ok(())
                }

                fn to_json(&self) -> $crate::__private::serde_json::Value {
                    $crate::__private::serialize_to_json(self)
                }

                fn debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::Debug::fmt(self, f)
                }
            }

            impl $crate::Typed for $ty {
                const KIND: $crate::Kind = $kind;
            }
        )+
    };
}

/// Implements [`Reflect`](crate::Reflect) and [`Typed`](crate::Typed) for a generic sequence
/// type whose elements implement `Reflect`.
macro_rules! impl_sequence {
    ($ty:ident<$generic:ident>) => {
        impl<$generic: $crate::Reflect + Clone> $crate::Reflect for $ty<$generic> {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Sequence
            }

            fn clone_value(&self) -> $crate::Value {
                $crate::Value::new(self.clone())
            }

            fn assign(&mut self, value: $crate::Value) -> Result<(), $crate::Value> {
                *self = value.downcast::<Self>()?;
                Ok(())
            }

            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::Array(self.iter().map($crate::Reflect::to_json).collect())
            }

            fn debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_list()
                    .entries(self.iter().map(|e| e as &dyn $crate::Reflect))
                    .finish()
            }
        }

        impl<$generic: $crate::Reflect + Clone> $crate::Typed for $ty<$generic> {
            const KIND: $crate::Kind = $crate::Kind::Sequence;
        }
    };
}

/// Implements [`Reflect`](crate::Reflect) and [`Typed`](crate::Typed) for map types with string
/// keys.
macro_rules! impl_map {
    ($ty:ident<String, $value:ident>) => {
        impl<$value: $crate::Reflect + Clone> $crate::Reflect for $ty<String, $value> {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Map
            }

            fn clone_value(&self) -> $crate::Value {
                $crate::Value::new(self.clone())
            }

            fn assign(&mut self, value: $crate::Value) -> Result<(), $crate::Value> {
                *self = value.downcast::<Self>()?;
                Ok(())
            }

            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::Object(
                    self.iter()
                        .map(|(k, v)| (k.clone(), $crate::Reflect::to_json(v)))
                        .collect(),
                )
            }

            fn debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_map()
                    .entries(self.iter().map(|(k, v)| (k, v as &dyn $crate::Reflect)))
                    .finish()
            }
        }

        impl<$value: $crate::Reflect + Clone> $crate::Typed for $ty<String, $value> {
            const KIND: $crate::Kind = $crate::Kind::Map;
        }
    };
}
