//! # Symbolic Integers
//!
//! Deferred integer values used while indexing is traced before shapes are
//! known. The normalizer treats them as opaque: it only asks whether a value
//! is actually deferred and, if not, reads its concrete value.

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An integer that may not be known yet.
///
/// Implementors are read-only from the point of view of this crate; values
/// are cloned through unchanged when they do not need to be inspected.
pub trait SymbolicInt: Clone + fmt::Debug {
    /// Wraps a concrete integer.
    fn from_int(value: i64) -> Self;

    /// Returns `true` if the value is still deferred.
    fn is_symbolic(&self) -> bool;

    /// Returns the concrete value.
    ///
    /// # Panics
    ///
    /// Panics if the value is symbolic. Check [`SymbolicInt::is_symbolic`]
    /// or use [`SymbolicInt::maybe_as_int`] first.
    fn expect_int(&self) -> i64;

    /// Returns the concrete value, or `None` if the value is deferred.
    fn maybe_as_int(&self) -> Option<i64> {
        if self.is_symbolic() {
            None
        } else {
            Some(self.expect_int())
        }
    }
}

/// An opaque named symbol standing in for an unknown integer.
#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymNode {
    name: String,
}

impl SymNode {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reference [`SymbolicInt`] implementation.
///
/// Serializes as a bare number for concrete values and as the symbol name
/// for deferred ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymInt {
    Int(i64),
    Symbol(Arc<SymNode>),
}

impl SymInt {
    /// Creates a fresh symbol. Two calls with the same name produce values
    /// that compare equal but are not [`SymInt::is_same`].
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Arc::new(SymNode { name: name.into() }))
    }

    /// Identity comparison: the same node for symbols, the same value for
    /// concrete integers.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl SymbolicInt for SymInt {
    fn from_int(value: i64) -> Self {
        Self::Int(value)
    }

    fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    fn expect_int(&self) -> i64 {
        match self {
            Self::Int(value) => *value,
            Self::Symbol(node) => panic!("expected a concrete integer, got symbol '{}'", node.name),
        }
    }
}

impl From<i64> for SymInt {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for SymInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Symbol(node) => f.write_str(&node.name),
        }
    }
}
