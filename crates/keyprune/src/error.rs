use derive_more::Display;
use keyprune_core::{
    column::ColumnError,
    condition::{CompileError, EvalError},
    config::ConfigError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::Unsupported => ErrorKind::Unsupported,
            ErrorClass::InvariantViolation => ErrorKind::Invalid,
            ErrorClass::Corruption => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ColumnError> for Error {
    fn from(err: ColumnError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The input uses a feature pruning cannot handle.
    Unsupported,

    /// The caller broke an input contract (key sizes, token shape, unbuilt sets).
    Invalid,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Compile,
    Evaluate,
    Column,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Compile => Self::Compile,
            CoreErrorOrigin::Evaluate => Self::Evaluate,
            CoreErrorOrigin::Column => Self::Column,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}

///
/// TESTS
///
