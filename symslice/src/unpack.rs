//! # Slice Normalization
//!
//! Resolves a [`SliceLike`] into a fully specified `(start, stop, step)`
//! triple with the same defaulting rules as standard slice indexing, while
//! letting symbolic bounds pass through untouched.
//!
//! Bounds are *not* clamped to any container length here; out-of-range
//! values are left for the indexing code to clamp at access time.

use core::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{
    error::{Component, UnpackError},
    index::{OverflowPolicy, MAX_INDEX, MIN_INDEX},
    slice::{Bound, Slice, SliceLike},
    sym_int::SymbolicInt,
};

/// Whether a symbolic step is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SymbolicStepPolicy {
    /// Fail with [`UnpackError::UnsupportedSymbolicStep`].
    #[default]
    Reject,
    /// Pass the step through. Absent bounds then cannot be defaulted.
    Allow,
}

/// Options for [`SliceNormalizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    pub symbolic_step: SymbolicStepPolicy,
    pub overflow: OverflowPolicy,
}

impl UnpackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbolic_step(mut self, symbolic_step: SymbolicStepPolicy) -> Self {
        self.symbolic_step = symbolic_step;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}

/// A slice with every field resolved.
///
/// `step` is never the concrete value `0`, and a concrete `step` is never
/// [`MIN_INDEX`], so negating it cannot overflow. Deserialization runs the
/// same checks as [`NormalizedSlice::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedSlice<S> {
    start: S,
    stop: S,
    step: S,
}

#[derive(Deserialize)]
struct RawNormalizedSlice<S> {
    start: S,
    stop: S,
    step: S,
}

impl<'de, S> Deserialize<'de> for NormalizedSlice<S>
where
    S: SymbolicInt + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNormalizedSlice::deserialize(deserializer)?;
        Self::new(raw.start, raw.stop, raw.step).map_err(de::Error::custom)
    }
}

impl<S: SymbolicInt> NormalizedSlice<S> {
    /// Builds a normalized triple from already resolved fields.
    ///
    /// A concrete `step` goes through [`clamp_step`]; a symbolic one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`UnpackError::ZeroStep`] if `step` is a concrete zero.
    pub fn new(start: S, stop: S, step: S) -> Result<Self, UnpackError> {
        let step = match step.maybe_as_int() {
            Some(value) => S::from_int(clamp_step(value)?),
            None => step,
        };
        Ok(Self { start, stop, step })
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn stop(&self) -> &S {
        &self.stop
    }

    pub fn step(&self) -> &S {
        &self.step
    }

    pub fn into_parts(self) -> (S, S, S) {
        (self.start, self.stop, self.step)
    }

    /// Returns the concrete triple if no field is symbolic.
    pub fn concrete(&self) -> Option<(i64, i64, i64)> {
        Some((
            self.start.maybe_as_int()?,
            self.stop.maybe_as_int()?,
            self.step.maybe_as_int()?,
        ))
    }

    /// Turns the triple back into slice input; concrete fields go through
    /// index coercion again, symbolic ones stay symbolic.
    pub fn to_slice(&self) -> Slice<S> {
        let bound = |value: &S| match value.maybe_as_int() {
            Some(value) => Bound::from(value),
            None => Bound::Sym(value.clone()),
        };
        Slice {
            start: bound(&self.start),
            stop: bound(&self.stop),
            step: bound(&self.step),
        }
    }
}

impl<S: fmt::Display> fmt::Display for NormalizedSlice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

/// Stateless slice normalizer; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceNormalizer {
    options: UnpackOptions,
}

impl SliceNormalizer {
    pub fn new(options: UnpackOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &UnpackOptions {
        &self.options
    }

    /// Normalizes `slice`.
    ///
    /// The step is resolved first since the defaults for `start` and `stop`
    /// depend on its sign.
    ///
    /// # Errors
    ///
    /// Returns an [`UnpackError`] for a zero step, a rejected symbolic step,
    /// an absent bound next to a symbolic step, or a field that is not an
    /// integer index. No partial result is produced.
    pub fn unpack<S, L>(&self, slice: &L) -> Result<NormalizedSlice<S>, UnpackError>
    where
        S: SymbolicInt,
        L: SliceLike<S> + ?Sized,
    {
        let step = self.unpack_step(slice.step())?;
        let start = self.unpack_bound(slice.start(), &step, Component::Start)?;
        let stop = self.unpack_bound(slice.stop(), &step, Component::Stop)?;
        Ok(NormalizedSlice { start, stop, step })
    }

    fn unpack_step<S: SymbolicInt>(&self, step: &Bound<S>) -> Result<S, UnpackError> {
        let step = match step {
            Bound::None => return Ok(S::from_int(1)),
            Bound::Sym(_) if self.options.symbolic_step == SymbolicStepPolicy::Reject => {
                tracing::trace!("rejected symbolic slice step");
                return Err(UnpackError::UnsupportedSymbolicStep);
            }
            Bound::Sym(value) => match value.maybe_as_int() {
                Some(step) => step,
                None => {
                    tracing::trace!(step = ?value, "passing through symbolic slice step");
                    return Ok(value.clone());
                }
            },
            Bound::Index(value) => {
                value
                    .to_index(self.options.overflow)
                    .map_err(|source| UnpackError::IndexConversion {
                        component: Component::Step,
                        source,
                    })?
            }
        };

        Ok(S::from_int(clamp_step(step)?))
    }

    fn unpack_bound<S: SymbolicInt>(
        &self,
        bound: &Bound<S>,
        step: &S,
        component: Component,
    ) -> Result<S, UnpackError> {
        match bound {
            Bound::Sym(value) => Ok(value.clone()),
            Bound::None => {
                let Some(step) = step.maybe_as_int() else {
                    tracing::trace!(%component, "no default for slice bound with symbolic step");
                    return Err(UnpackError::SymbolicStepDefault { component });
                };
                Ok(S::from_int(default_bound(component, step)))
            }
            Bound::Index(value) => value
                .to_index(self.options.overflow)
                .map(S::from_int)
                .map_err(|source| UnpackError::IndexConversion { component, source }),
        }
    }
}

/// Rejects a zero step and maps [`MIN_INDEX`] to `-MAX_INDEX`.
///
/// Both values lie far beyond any real length, so the remap does not change
/// which elements are selected, but it keeps `-step` representable.
pub fn clamp_step(step: i64) -> Result<i64, UnpackError> {
    if step == 0 {
        return Err(UnpackError::ZeroStep);
    }
    if step < -MAX_INDEX {
        tracing::trace!(step, clamped = -MAX_INDEX, "clamped most negative slice step");
        return Ok(-MAX_INDEX);
    }
    Ok(step)
}

fn default_bound(component: Component, step: i64) -> i64 {
    match (component, step < 0) {
        (Component::Start, false) => 0,
        (Component::Start, true) => MAX_INDEX,
        (_, false) => MAX_INDEX,
        (_, true) => MIN_INDEX,
    }
}

/// Normalizes `slice` with default [`UnpackOptions`].
///
/// # Errors
///
/// See [`SliceNormalizer::unpack`].
pub fn unpack<S, L>(slice: &L) -> Result<NormalizedSlice<S>, UnpackError>
where
    S: SymbolicInt,
    L: SliceLike<S> + ?Sized,
{
    SliceNormalizer::default().unpack(slice)
}
