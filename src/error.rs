//! Error types for matbench operations.
//!
//! Matrix construction, multiplication and benchmark runs report failures
//! through [`MatbenchError`] instead of panicking, so the suite runner can
//! decide whether a failure is memory exhaustion or something else.

use thiserror::Error;

/// Errors that can occur while building, multiplying or benchmarking matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatbenchError {
    /// Memory could not be obtained for a matrix buffer.
    #[error("Memory allocation failed: {message} (requested {requested_size} bytes)")]
    AllocationError {
        /// The number of bytes that was requested.
        requested_size: usize,
        /// Human-readable error message.
        message: String,
    },
    /// The column count of the left operand differs from the row count of the right one.
    #[error(
        "Dimension mismatch: cannot multiply {}x{} by {}x{}",
        left.0, left.1, right.0, right.1
    )]
    DimensionMismatch {
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        right: (usize, usize),
    },
    /// Input validation error.
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl MatbenchError {
    /// Returns `true` when the error means the process ran out of memory
    /// (or would have, given the configured limit).
    pub fn is_memory_exhaustion(&self) -> bool {
        matches!(self, MatbenchError::AllocationError { .. })
    }
}

/// Result type alias for matbench operations.
pub type Result<T> = std::result::Result<T, MatbenchError>;

/// Creates an allocation error.
pub fn allocation_error(size: usize, message: impl Into<String>) -> MatbenchError {
    MatbenchError::AllocationError {
        requested_size: size,
        message: message.into(),
    }
}

/// Creates a dimension mismatch error from the two operand shapes.
pub fn dimension_error(left: (usize, usize), right: (usize, usize)) -> MatbenchError {
    MatbenchError::DimensionMismatch { left, right }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> MatbenchError {
    MatbenchError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1024, "out of memory");
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("1024 bytes"));
        assert!(display.contains("out of memory"));
    }

    #[test]
    fn test_dimension_error_display() {
        let error = dimension_error((2, 3), (4, 5));
        assert_eq!(
            error.to_string(),
            "Dimension mismatch: cannot multiply 2x3 by 4x5"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("rows must have equal length");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("rows must have equal length"));
    }

    #[test]
    fn test_memory_exhaustion_classification() {
        assert!(allocation_error(8, "test").is_memory_exhaustion());
        assert!(!dimension_error((1, 2), (3, 1)).is_memory_exhaustion());
        assert!(!validation_error("test").is_memory_exhaustion());
    }

    #[test]
    fn test_error_equality() {
        let error1 = allocation_error(1024, "test");
        let error2 = allocation_error(1024, "test");
        let error3 = allocation_error(2048, "test");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = allocation_error(1024, "test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
