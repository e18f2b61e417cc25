//! Error types shared across the indicator functions and the column table.

use thiserror::Error;

/// Failure conditions surfaced by the library.
///
/// Every indicator function is a pure computation: a call either returns the
/// fully materialized output sequences or one of these errors before any
/// output is produced. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The input series is shorter than the indicator's lookback, or a
    /// parameter makes the computation meaningless.
    #[error("{indicator}: input has {actual} samples, at least {required} required")]
    InvalidInput {
        /// Name of the indicator that rejected the input.
        indicator: &'static str,
        /// Minimum number of samples required.
        required: usize,
        /// Number of samples provided.
        actual: usize,
    },

    /// The output buffer could not be allocated. Propagated unchanged.
    #[error("{indicator}: failed to allocate output buffer of {len} samples")]
    AllocationFailure {
        /// Name of the indicator whose output allocation failed.
        indicator: &'static str,
        /// Requested buffer length.
        len: usize,
    },

    /// A requested column is not present in the table.
    #[error("column '{name}' not found")]
    ColumnNotFound {
        /// The missing column name.
        name: String,
    },

    /// A requested column exists but cannot be read as f64.
    #[error("column '{name}' cannot be read as f64")]
    InvalidColumn {
        /// The offending column name.
        name: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndicatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = IndicatorError::InvalidInput {
            indicator: "sine_wave",
            required: 63,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "sine_wave: input has 10 samples, at least 63 required"
        );
    }

    #[test]
    fn test_column_not_found_message() {
        let err = IndicatorError::ColumnNotFound {
            name: "close".to_string(),
        };
        assert_eq!(err.to_string(), "column 'close' not found");
    }
}
