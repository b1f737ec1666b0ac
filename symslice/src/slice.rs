//! # Slice Input
//!
//! A `(start, stop, step)` triple as written by a caller, before any
//! defaulting or validation.

use core::{fmt, str::FromStr};

use crate::{
    error::{Component, ParseSliceError},
    index::IndexValue,
    sym_int::SymInt,
};

/// One field of a slice expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Bound<S> {
    /// Not given.
    #[default]
    None,
    /// A concrete value that still has to go through index coercion.
    Index(IndexValue),
    /// A symbolic integer, passed through as-is.
    Sym(S),
}

impl<S> Bound<S> {
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<S> From<IndexValue> for Bound<S> {
    fn from(value: IndexValue) -> Self {
        Self::Index(value)
    }
}

impl<S> From<i64> for Bound<S> {
    fn from(value: i64) -> Self {
        Self::Index(value.into())
    }
}

impl<S> From<f64> for Bound<S> {
    fn from(value: f64) -> Self {
        Self::Index(value.into())
    }
}

impl<S> From<Option<i64>> for Bound<S> {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::None, Self::from)
    }
}

impl From<SymInt> for Bound<SymInt> {
    fn from(value: SymInt) -> Self {
        Self::Sym(value)
    }
}

impl<S: fmt::Display> fmt::Display for Bound<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Index(value) => write!(f, "{value}"),
            Self::Sym(value) => write!(f, "{value}"),
        }
    }
}

/// Anything exposing the three fields of a slice.
pub trait SliceLike<S> {
    fn start(&self) -> &Bound<S>;
    fn stop(&self) -> &Bound<S>;
    fn step(&self) -> &Bound<S>;
}

/// A slice expression with each field possibly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice<S> {
    pub start: Bound<S>,
    pub stop: Bound<S>,
    pub step: Bound<S>,
}

impl<S> Slice<S> {
    pub fn new(
        start: impl Into<Bound<S>>,
        stop: impl Into<Bound<S>>,
        step: impl Into<Bound<S>>,
    ) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            step: step.into(),
        }
    }

    /// The `::` slice, selecting everything.
    pub const fn full() -> Self {
        Self {
            start: Bound::None,
            stop: Bound::None,
            step: Bound::None,
        }
    }
}

impl<S> SliceLike<S> for Slice<S> {
    fn start(&self) -> &Bound<S> {
        &self.start
    }

    fn stop(&self) -> &Bound<S> {
        &self.stop
    }

    fn step(&self) -> &Bound<S> {
        &self.step
    }
}

impl<S> SliceLike<S> for (Bound<S>, Bound<S>, Bound<S>) {
    fn start(&self) -> &Bound<S> {
        &self.0
    }

    fn stop(&self) -> &Bound<S> {
        &self.1
    }

    fn step(&self) -> &Bound<S> {
        &self.2
    }
}

impl<S: fmt::Display> fmt::Display for Slice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.stop)?;
        if !self.step.is_none() {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

/// Parses `start:stop` or `start:stop:step`.
///
/// Identifiers become fresh symbols, so `s0:s0` yields two distinct nodes
/// that merely share a name. `inf`, `infinity` and `nan` (any case) are read
/// as floats, not symbols.
impl FromStr for Slice<SymInt> {
    type Err = ParseSliceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = input.split(':').collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(ParseSliceError::FieldCount {
                input: input.to_string(),
                fields: fields.len(),
            });
        }

        let start = parse_bound(fields[0], Component::Start)?;
        let stop = parse_bound(fields[1], Component::Stop)?;
        let step = match fields.get(2) {
            Some(text) => parse_bound(text, Component::Step)?,
            None => Bound::None,
        };

        Ok(Self { start, stop, step })
    }
}

fn parse_bound(text: &str, component: Component) -> Result<Bound<SymInt>, ParseSliceError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Bound::None);
    }
    if is_float_keyword(text) {
        return Ok(Bound::Index(IndexValue::Float(text.parse().unwrap_or(f64::NAN))));
    }
    if is_identifier(text) {
        return Ok(Bound::Sym(SymInt::symbol(text)));
    }
    if let Some(value) = parse_int_literal(text) {
        return Ok(Bound::Index(IndexValue::Int(value)));
    }
    match text.parse::<f64>() {
        Ok(value) => Ok(Bound::Index(IndexValue::Float(value))),
        Err(_) => Err(ParseSliceError::InvalidField {
            component,
            text: text.to_string(),
        }),
    }
}

fn is_float_keyword(text: &str) -> bool {
    ["inf", "infinity", "nan"]
        .iter()
        .any(|keyword| text.eq_ignore_ascii_case(keyword))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Integer literals of any length; values beyond `i128` saturate, which is
/// already far outside the index range.
fn parse_int_literal(text: &str) -> Option<i128> {
    let (negative, digits) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let signed = if negative { format!("-{digits}") } else { digits };
    Some(signed.parse::<i128>().unwrap_or(if negative { i128::MIN } else { i128::MAX }))
}
