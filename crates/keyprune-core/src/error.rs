use crate::{
    column::ColumnError,
    condition::{CompileError, EvalError},
    config::ConfigError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured error with a stable classification, for callers that want a
/// single error type across compile, evaluation and configuration.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Compile(CompileError),
    #[error("{0}")]
    Evaluate(EvalError),
    #[error("{0}")]
    Column(ColumnError),
    #[error("{0}")]
    Config(ConfigError),
}

impl From<CompileError> for InternalError {
    fn from(err: CompileError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Compile,
            message: err.to_string(),
            detail: Some(ErrorDetail::Compile(err)),
        }
    }
}

impl From<EvalError> for InternalError {
    fn from(err: EvalError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Evaluate,
            message: err.to_string(),
            detail: Some(ErrorDetail::Evaluate(err)),
        }
    }
}

impl From<ColumnError> for InternalError {
    fn from(err: ColumnError) -> Self {
        let class = match err {
            ColumnError::TypeMismatch { .. } => ErrorClass::Unsupported,
            ColumnError::ColumnOutOfRange { .. } | ColumnError::ArityMismatch { .. } => {
                ErrorClass::InvariantViolation
            }
        };

        Self {
            class,
            origin: ErrorOrigin::Column,
            message: err.to_string(),
            detail: Some(ErrorDetail::Column(err)),
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Compile,
    Evaluate,
    Column,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compile => "compile",
            Self::Evaluate => "evaluate",
            Self::Column => "column",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_errors_keep_their_detail() {
        let err = InternalError::from(EvalError::InvalidStack { depth: 2 });

        assert_eq!(err.origin, ErrorOrigin::Evaluate);
        assert_eq!(err.class, ErrorClass::Corruption);
        assert!(matches!(
            err.detail,
            Some(ErrorDetail::Evaluate(EvalError::InvalidStack { depth: 2 }))
        ));
        assert!(err.display_with_class().starts_with("evaluate:corruption:"));
    }

    #[test]
    fn unsupported_literals_classify_as_unsupported() {
        let err = InternalError::from(CompileError::UnsupportedLiteral {
            field: "a".to_string(),
            kind: "regex",
        });

        assert_eq!(err.class, ErrorClass::Unsupported);
        assert_eq!(err.origin, ErrorOrigin::Compile);
    }

    #[test]
    fn column_arity_is_an_invariant_violation() {
        let err = InternalError::from(ColumnError::ArityMismatch {
            expected: 3,
            found: 2,
        });

        assert_eq!(err.class, ErrorClass::InvariantViolation);
        assert_eq!(err.to_string(), "key tuple has 2 values, expected 3");
    }
}
