use core::fmt;

use thiserror::Error;

/// Which field of a slice an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Start,
    Stop,
    Step,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Step => "step",
        })
    }
}

/// Reasons a value could not be turned into a slice index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    #[error("slice indices must be integers or None or have an index conversion, got {type_name}")]
    NotAnInteger { type_name: &'static str },

    #[error("integer {value} does not fit in a 64-bit slice index")]
    Overflow { value: i128 },

    #[error("{reason}")]
    Custom { reason: String },
}

/// Errors that can occur while normalizing a slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnpackError {
    /// The step resolved to a concrete zero.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// The step was given as a symbolic integer.
    #[error("slice step can't be symbolic")]
    UnsupportedSymbolicStep,

    /// A bound was absent and its default depends on the sign of a
    /// symbolic step.
    #[error("can't use a symbolic step to determine the default slice {component} index")]
    SymbolicStepDefault { component: Component },

    /// A provided bound or step could not be converted to an index.
    #[error("failed to convert slice {component} to an integer index: {source}")]
    IndexConversion {
        component: Component,
        #[source]
        source: ConversionFailure,
    },
}

/// Errors from parsing the `start:stop:step` text notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSliceError {
    #[error("expected 'start:stop' or 'start:stop:step', got {fields} field(s) in '{input}'")]
    FieldCount { input: String, fields: usize },

    #[error("invalid slice {component} '{text}': expected an integer, a float or an identifier")]
    InvalidField { component: Component, text: String },
}
