//! Structured errors
//!
//! Two layers. `MatrixError` is the typed failure of the numeric core and is
//! what the pure functions return. `MatpropError` is the structured value
//! handed to callers at the dynamic boundary: it carries a machine-readable
//! code, a message, an optional suggestion and a severity, and it
//! serializes cleanly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const EMPTY_MATRIX: &str = "EMPTY_MATRIX";
    pub const NOT_SQUARE: &str = "NOT_SQUARE";
    pub const SINGULAR_MATRIX: &str = "SINGULAR_MATRIX";
    pub const UNSUPPORTED_ORDER: &str = "UNSUPPORTED_ORDER";
    pub const COMPLEX_RESULT: &str = "COMPLEX_RESULT";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const LIMIT_EXCEEDED: &str = "LIMIT_EXCEEDED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Failure of a matrix computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("expected {expected} elements for the declared dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("matrix must have at least one row and one column")]
    Empty,

    #[error("matrix is not square ({rows}×{cols})")]
    NonSquare { rows: usize, cols: usize },

    #[error("singular matrix (zero pivot at row {pivot})")]
    Singular { pivot: usize },

    #[error("only 2×2 matrices are supported, got order {order}")]
    UnsupportedOrder { order: usize },

    #[error("complex eigenvalues are not supported (discriminant {discriminant})")]
    ComplexEigenvalues { discriminant: f64 },
}

impl MatrixError {
    /// Machine-readable code for this failure
    pub fn code(&self) -> &'static str {
        match self {
            MatrixError::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            MatrixError::Empty => codes::EMPTY_MATRIX,
            MatrixError::NonSquare { .. } => codes::NOT_SQUARE,
            MatrixError::Singular { .. } => codes::SINGULAR_MATRIX,
            MatrixError::UnsupportedOrder { .. } => codes::UNSUPPORTED_ORDER,
            MatrixError::ComplexEigenvalues { .. } => codes::COMPLEX_RESULT,
        }
    }
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The property is unavailable, the rest of the request is fine
    Warning,
    /// The call failed
    Error,
    /// The whole request cannot proceed
    Fatal,
}

/// Structured error returned across the dynamic boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatpropError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl MatpropError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_count_range(func: &str, min: usize, max: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} to {} arguments, got {}", func, min, max, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn limit_exceeded(func: &str, order: usize, limit: usize) -> Self {
        Self::new(codes::LIMIT_EXCEEDED,
            format!("{}() on order {} exceeds the configured limit of {}", func, order, limit))
            .with_suggestion("Cofactor expansion is O(n!); raise max_cofactor_order if this is intended")
    }

    /// Wrap a core failure, prefixing the function that produced it
    pub fn from_matrix(func: &str, err: MatrixError) -> Self {
        let mut e = Self::from(err);
        e.message = format!("{}: {}", func, e.message);
        e
    }
}

impl std::fmt::Display for MatpropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MatpropError {}

impl From<MatrixError> for MatpropError {
    fn from(err: MatrixError) -> Self {
        let base = Self::new(err.code(), err.to_string());
        match err {
            MatrixError::DimensionMismatch { .. } => base
                .with_suggestion("Provide exactly rows × cols numbers")
                .with_severity(Severity::Fatal),
            MatrixError::Empty => base.with_severity(Severity::Fatal),
            MatrixError::NonSquare { .. } => base
                .with_suggestion("Check squareness before requesting this property"),
            MatrixError::Singular { .. } => base.with_severity(Severity::Warning),
            MatrixError::UnsupportedOrder { .. } | MatrixError::ComplexEigenvalues { .. } => base,
        }
    }
}
