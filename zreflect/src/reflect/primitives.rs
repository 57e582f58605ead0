//! Reflect implementations for primitive types.

use crate::Kind;

impl_reflect!(() => Kind::Unit);

// Boolean type.
impl_reflect!(bool => Kind::Bool);

// Integer types.
impl_reflect!(i8, i16, i32, i64, i128, isize => Kind::Int);
impl_reflect!(u8, u16, u32, u64, u128, usize => Kind::Uint);

// Floating-point types.
impl_reflect!(f32, f64 => Kind::Float);

// Text types.
impl_reflect!(char => Kind::Char);
impl_reflect!(String, &'static str => Kind::String);
