//! Reflect implementations for external third-party crates.
//!
//! These types expose no structure of their own and are reflected as [`Kind::Opaque`], rendered
//! to JSON as their string form.

#[cfg(any(feature = "uuid", feature = "chrono", feature = "time", feature = "url"))]
use crate::Kind;

// Local macro for this module: leaf types rendered through `Display`.
#[cfg(any(feature = "uuid", feature = "chrono", feature = "time", feature = "url"))]
macro_rules! impl_display_reflect {
    ($($ty:ty),* => $kind:expr) => {
        $(
            impl crate::Reflect for $ty {
                fn kind(&self) -> Kind {
                    $kind
                }

                fn clone_value(&self) -> crate::Value {
                    crate::Value::new(self.clone())
                }

                fn assign(&mut self, value: crate::Value) -> Result<(), crate::Value> {
                    *self = value.downcast::<Self>()?;
                    Ok(())
                }

                fn to_json(&self) -> serde_json::Value {
                    serde_json::Value::String(self.to_string())
                }

                fn debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    core::fmt::Debug::fmt(self, f)
                }
            }

            impl crate::Typed for $ty {
                const KIND: Kind = $kind;
            }
        )*
    };
}

// ============================================================================
// UUID support
// ============================================================================

#[cfg(feature = "uuid")]
impl_display_reflect!(uuid::Uuid => Kind::Opaque);

// ============================================================================
// URL support
// ============================================================================

#[cfg(feature = "url")]
impl_display_reflect!(url::Url => Kind::Opaque);

// ============================================================================
// Chrono support
// ============================================================================

#[cfg(feature = "chrono")]
impl_display_reflect!(
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::Duration
    => Kind::Opaque
);

// ============================================================================
// Time support
// ============================================================================

#[cfg(feature = "time")]
impl_display_reflect!(
    time::Date,
    time::Time,
    time::PrimitiveDateTime,
    time::OffsetDateTime,
    time::Duration
    => Kind::Opaque
);

// ============================================================================
// Bytes support
// ============================================================================

// A byte buffer is a sequence of `u8`, rendered as an array of numbers.
#[cfg(feature = "bytes")]
crate::impl_reflect!(bytes::Bytes => crate::Kind::Sequence);
