use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The inference error type.
///
/// Every variant is recoverable: it describes a bad input batch, never a broken
/// `ParameterStore`.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// The input batch doesn't have the shape the parameters expect.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A NaN or infinite value showed up in the activations.
    NumericAnomaly { what: &'static str },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            MlErr::NumericAnomaly { what } => {
                write!(f, "non-finite values found in {what}")
            }
        }
    }
}

impl Error for MlErr {}
