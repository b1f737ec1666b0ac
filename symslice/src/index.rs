//! # Index Coercion
//!
//! Converts user-provided slice fields into 64-bit indices, following the
//! usual slice-index protocol: integers and integer-like values are accepted,
//! floats are not, and objects may provide their own conversion.

use core::fmt;
use std::sync::Arc;

use crate::error::ConversionFailure;

/// Largest representable slice index.
pub const MAX_INDEX: i64 = i64::MAX;

/// Smallest representable slice index.
pub const MIN_INDEX: i64 = i64::MIN;

// The step clamp relies on `-MAX_INDEX` being representable and no smaller
// than `MIN_INDEX + 1`.
const _: () = assert!(MIN_INDEX + 1 <= -MAX_INDEX);

/// A value that knows how to turn itself into a slice index.
pub trait SliceIndex: fmt::Debug + Send + Sync {
    fn slice_index(&self) -> Result<i64, ConversionFailure>;
}

/// How integers outside the index range are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Saturate to [`MIN_INDEX`] or [`MAX_INDEX`].
    #[default]
    Clamp,
    /// Fail with [`ConversionFailure::Overflow`].
    Error,
}

/// A concrete, not yet validated slice field.
#[derive(Debug, Clone)]
pub enum IndexValue {
    /// An integer literal, possibly wider than an index.
    Int(i128),
    /// Integer-like; converts to `0` or `1`.
    Bool(bool),
    /// Never a valid index.
    Float(f64),
    /// A caller-defined type with its own conversion.
    Object(Arc<dyn SliceIndex>),
}

impl IndexValue {
    pub fn object(value: impl SliceIndex + 'static) -> Self {
        Self::Object(Arc::new(value))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Object(_) => "object",
        }
    }

    /// Converts the value into an index.
    pub fn to_index(&self, policy: OverflowPolicy) -> Result<i64, ConversionFailure> {
        match self {
            Self::Int(value) => clamp_int(*value, policy),
            Self::Bool(value) => Ok(i64::from(*value)),
            Self::Float(_) => Err(ConversionFailure::NotAnInteger {
                type_name: self.type_name(),
            }),
            Self::Object(object) => object.slice_index(),
        }
    }
}

fn clamp_int(value: i128, policy: OverflowPolicy) -> Result<i64, ConversionFailure> {
    match i64::try_from(value) {
        Ok(index) => Ok(index),
        Err(_) if policy == OverflowPolicy::Error => Err(ConversionFailure::Overflow { value }),
        Err(_) if value < 0 => Ok(MIN_INDEX),
        Err(_) => Ok(MAX_INDEX),
    }
}

impl PartialEq for IndexValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_nan() => f.write_str("nan"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Object(object) => write!(f, "{object:?}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IndexValue {
                fn from(value: $ty) -> Self {
                    Self::Int(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for IndexValue {
    fn from(value: u128) -> Self {
        Self::Int(i128::try_from(value).unwrap_or(i128::MAX))
    }
}

impl From<bool> for IndexValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for IndexValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for IndexValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
