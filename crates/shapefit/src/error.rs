//! Contract-violation errors.
//!
//! Numerical failures (too few points, singular systems, non-ellipse conics)
//! are never reported here; they surface as the invalid sentinel of the
//! fitted type. This enum only covers arguments a caller got wrong.

/// Errors raised for invalid arguments at the public call boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// A per-point slice does not match the number of points.
    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch {
        /// Number of points.
        expected: usize,
        /// Length of the offending slice.
        got: usize,
    },

    /// The IRLS iteration budget must be greater than one.
    #[error("iteration budget must be greater than 1, got {iters}")]
    InvalidIterations {
        /// Rejected budget.
        iters: usize,
    },

    /// The convergence tolerance must be strictly positive.
    #[error("tolerance must be strictly positive, got {tolerance}")]
    InvalidTolerance {
        /// Rejected tolerance.
        tolerance: f64,
    },

    /// A weight-kernel constant is negative or not a number.
    #[error("kernel constant `{name}` must be non-negative, got {value}")]
    InvalidKernelConstant {
        /// Name of the constant (`c`, `k`, `multiplier`, `min_scale`).
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Result alias for fallible fitting calls.
pub type Result<T> = std::result::Result<T, FitError>;

/// Fail with [`FitError::LengthMismatch`] unless `got == expected`.
pub(crate) fn ensure_len(expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(FitError::LengthMismatch { expected, got })
    }
}

/// Fail with [`FitError::InvalidKernelConstant`] unless `value >= 0`.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FitError::InvalidKernelConstant { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_check() {
        assert!(ensure_len(3, 3).is_ok());
        assert_eq!(
            ensure_len(3, 2),
            Err(FitError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn nan_constant_is_rejected() {
        assert!(ensure_non_negative("c", 0.0).is_ok());
        assert!(ensure_non_negative("c", -1e-12).is_err());
        assert!(ensure_non_negative("k", f64::NAN).is_err());
    }

    #[test]
    fn messages_name_the_argument() {
        let e = FitError::InvalidKernelConstant {
            name: "multiplier",
            value: -2.0,
        };
        assert_eq!(
            e.to_string(),
            "kernel constant `multiplier` must be non-negative, got -2"
        );
    }
}
