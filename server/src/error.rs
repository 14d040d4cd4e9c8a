use std::{error::Error, fmt, io};

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use machine_learning::{LoadErr, MlErr};

use crate::schema::ErrorBody;

/// The server module's result type.
pub type Result<T> = std::result::Result<T, ServerErr>;

/// Startup failures, any of them stops the server before it binds.
#[derive(Debug)]
pub enum ServerErr {
    Config { key: &'static str, value: String },
    Load(LoadErr),
    Io(io::Error),
}

impl fmt::Display for ServerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerErr::Config { key, value } => write!(f, "invalid value for {key}: {value:?}"),
            ServerErr::Load(e) => write!(f, "failed to load the model: {e}"),
            ServerErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for ServerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServerErr::Load(e) => Some(e),
            ServerErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ServerErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LoadErr> for ServerErr {
    fn from(value: LoadErr) -> Self {
        Self::Load(value)
    }
}

/// Boundary conversion for the binary.
impl From<ServerErr> for io::Error {
    fn from(value: ServerErr) -> Self {
        match value {
            ServerErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// A failed request. Rendered as `{"error": "..."}`, never as a bare status.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request itself is malformed.
    BadRequest(String),
    /// The request is well formed but its values broke the arithmetic.
    Unprocessable(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.message().to_string(),
        })
    }
}

impl From<MlErr> for ApiError {
    fn from(value: MlErr) -> Self {
        match value {
            MlErr::ShapeMismatch { .. } => ApiError::BadRequest(value.to_string()),
            MlErr::NumericAnomaly { .. } => ApiError::Unprocessable(value.to_string()),
        }
    }
}
