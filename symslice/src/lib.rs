//! Slice normalization for traced indexing
//!
//! This crate resolves `start:stop:step` slice expressions into a canonical,
//! fully specified triple using standard slice-defaulting rules, while
//! allowing bounds to be symbolic integers whose values are not known yet.

mod error;
mod index;
mod slice;
mod sym_int;
mod unpack;

// Convenient re-exports
pub use error::{Component, ConversionFailure, ParseSliceError, UnpackError};
pub use index::{IndexValue, OverflowPolicy, SliceIndex, MAX_INDEX, MIN_INDEX};
pub use slice::{Bound, Slice, SliceLike};
pub use sym_int::{SymInt, SymNode, SymbolicInt};
pub use unpack::{
    clamp_step, unpack, NormalizedSlice, SliceNormalizer, SymbolicStepPolicy, UnpackOptions,
};
