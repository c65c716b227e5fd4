//! Matrix error taxonomy
//!
//! Every failure the matrix layer can raise maps to exactly one variant of
//! [`MatrixError`]. Errors are returned, never logged or swallowed. At the
//! function-call boundary they are turned into an [`ErrorReport`], a flat
//! serializable shape with a machine-readable code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_ERROR: &str = "DIMENSION_ERROR";
    pub const DATA_ERROR: &str = "DATA_ERROR";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const ALIGNMENT_ERROR: &str = "ALIGNMENT_ERROR";
    pub const ALLOCATION_ERROR: &str = "ALLOCATION_ERROR";
    pub const RANGE_ERROR: &str = "RANGE_ERROR";
    pub const UNSET_ERROR: &str = "UNSET_ERROR";
    pub const SQUARENESS_ERROR: &str = "SQUARENESS_ERROR";
    pub const NON_INVERTIBLE: &str = "NON_INVERTIBLE";
    pub const INPUT_ERROR: &str = "INPUT_ERROR";
    // Call-boundary codes
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Failure raised by a matrix operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("Matrix sizes error: dimensions must be positive, got {rows}×{cols}")]
    Dimension { rows: usize, cols: usize },

    #[error("Incorrect data: {reason}")]
    Data { reason: String },

    #[error("Calculation impossible: matrix dimensions differ ({}×{} vs {}×{})", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Calculation impossible: left matrix has {left_cols} columns but right matrix has {right_rows} rows")]
    Alignment { left_cols: usize, right_rows: usize },

    #[error("Memory allocation failed for {rows}×{cols} elements")]
    Allocation { rows: usize, cols: usize },

    #[error("Out of range: {reason}")]
    Range { reason: String },

    #[error("Matrix not set: the operation needs allocated storage")]
    Unset,

    #[error("The matrix is not square ({rows}×{cols})")]
    Squareness { rows: usize, cols: usize },

    #[error("The matrix is not invertible: the determinant is zero")]
    NonInvertible,

    #[error("Input error: {reason}")]
    Input { reason: String },
}

impl MatrixError {
    // ========== Common Error Constructors ==========

    pub fn non_finite(value: f64) -> Self {
        Self::Data { reason: format!("{} is not a finite number", value) }
    }

    pub fn incomparable(a: f64, b: f64) -> Self {
        Self::Data { reason: format!("cannot compare {} with {}", a, b) }
    }

    pub fn index_out_of_range(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::Range {
            reason: format!("element ({}, {}) is outside a {}×{} matrix", row, col, rows, cols),
        }
    }

    pub fn count_out_of_range(count: usize, capacity: usize) -> Self {
        Self::Range {
            reason: format!("{} values do not fit into {} cells", count, capacity),
        }
    }

    pub fn shrink(from: (usize, usize), to: (usize, usize)) -> Self {
        Self::Range {
            reason: format!(
                "cannot shrink {}×{} to {}×{}, resize only grows",
                from.0, from.1, to.0, to.1
            ),
        }
    }

    pub fn minor_undefined(rows: usize, cols: usize) -> Self {
        Self::Range {
            reason: format!("minor is undefined for a {}×{} matrix", rows, cols),
        }
    }

    pub fn input(reason: impl Into<String>) -> Self {
        Self::Input { reason: reason.into() }
    }

    /// Machine-readable code for this error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dimension { .. } => codes::DIMENSION_ERROR,
            Self::Data { .. } => codes::DATA_ERROR,
            Self::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            Self::Alignment { .. } => codes::ALIGNMENT_ERROR,
            Self::Allocation { .. } => codes::ALLOCATION_ERROR,
            Self::Range { .. } => codes::RANGE_ERROR,
            Self::Unset => codes::UNSET_ERROR,
            Self::Squareness { .. } => codes::SQUARENESS_ERROR,
            Self::NonInvertible => codes::NON_INVERTIBLE,
            Self::Input { .. } => codes::INPUT_ERROR,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Dimension { .. } => Some("Use at least one row and one column"),
            Self::Data { .. } => Some("Remove NaN and infinite values"),
            Self::DimensionMismatch { .. } => Some("Both operands must have the same shape"),
            Self::Alignment { .. } => Some("Columns of the left operand must equal rows of the right operand"),
            Self::Unset => Some("Resize or fill the matrix first"),
            Self::Squareness { .. } => Some("Use a square matrix"),
            Self::NonInvertible => Some("Check for linearly dependent rows"),
            Self::Range { .. } | Self::Input { .. } | Self::Allocation { .. } => None,
        }
    }
}

/// Structured error carried across the function-call boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list to see available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn not_found(name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No function named '{}'", name))
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl From<MatrixError> for ErrorReport {
    fn from(err: MatrixError) -> Self {
        let report = Self::new(err.kind(), err.to_string());
        match err.suggestion() {
            Some(s) => report.with_suggestion(s),
            None => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(MatrixError::Unset.kind(), codes::UNSET_ERROR);
        assert_eq!(MatrixError::NonInvertible.kind(), codes::NON_INVERTIBLE);
        assert_eq!(MatrixError::non_finite(f64::NAN).kind(), codes::DATA_ERROR);
        assert_eq!(MatrixError::shrink((2, 2), (1, 2)).kind(), codes::RANGE_ERROR);
        assert_eq!(MatrixError::input("bad").kind(), codes::INPUT_ERROR);
    }

    #[test]
    fn test_display_messages() {
        let err = MatrixError::DimensionMismatch { left: (3, 4), right: (3, 3) };
        assert_eq!(
            err.to_string(),
            "Calculation impossible: matrix dimensions differ (3×4 vs 3×3)"
        );

        let err = MatrixError::Alignment { left_cols: 4, right_rows: 3 };
        assert!(err.to_string().contains("4 columns"));

        let err = MatrixError::index_out_of_range(5, 0, 3, 4);
        assert!(err.to_string().contains("(5, 0)"));
    }

    #[test]
    fn test_report_from_error() {
        let report = ErrorReport::from(MatrixError::Squareness { rows: 2, cols: 3 });
        assert_eq!(report.code, codes::SQUARENESS_ERROR);
        assert!(report.message.contains("2×3"));
        assert_eq!(report.suggestion.as_deref(), Some("Use a square matrix"));

        let report = ErrorReport::from(MatrixError::input("negative count"));
        assert!(report.suggestion.is_none());
    }

    #[test]
    fn test_report_serialization_skips_missing_suggestion() {
        let report = ErrorReport::new(codes::RANGE_ERROR, "out of range");
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("suggestion"));
    }
}
