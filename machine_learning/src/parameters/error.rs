use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use safetensors::{Dtype, SafeTensorError};

/// The result type for building or loading a `ParameterStore`.
pub type Result<T> = std::result::Result<T, LoadErr>;

/// Error returned whenever a parameter artifact can't become a `ParameterStore`.
///
/// All of these are fatal at startup, the service must not serve without parameters.
#[derive(Debug)]
pub enum LoadErr {
    Io(io::Error),
    Format(SafeTensorError),
    MissingTensor(&'static str),
    UnsupportedDtype {
        name: &'static str,
        dtype: Dtype,
    },
    BadRank {
        name: &'static str,
        shape: Vec<usize>,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    NonFinite(&'static str),
    UnexpectedTensors(Vec<String>),
}

impl Display for LoadErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErr::Io(e) => write!(f, "failed to read the parameter artifact: {e}"),
            LoadErr::Format(e) => write!(f, "corrupt parameter artifact: {e}"),
            LoadErr::MissingTensor(name) => {
                write!(f, "the parameter artifact has no tensor named {name}")
            }
            LoadErr::UnsupportedDtype { name, dtype } => {
                write!(f, "tensor {name} has dtype {dtype:?}, expected F32 or F64")
            }
            LoadErr::BadRank { name, shape } => {
                write!(f, "tensor {name} has an unexpected shape {shape:?}")
            }
            LoadErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            LoadErr::NonFinite(name) => write!(f, "tensor {name} contains NaN or infinite values"),
            LoadErr::UnexpectedTensors(names) => write!(
                f,
                "the parameter artifact holds unexpected tensors {names:?}, expected only W1, W2, B1 and B2"
            ),
        }
    }
}

impl Error for LoadErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadErr::Io(e) => Some(e),
            LoadErr::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SafeTensorError> for LoadErr {
    fn from(value: SafeTensorError) -> Self {
        Self::Format(value)
    }
}
