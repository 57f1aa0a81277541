//! Error types shared by all estimators.

use thiserror::Error;

/// Errors that can occur while estimating round counts or constraint counts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    /// The S-box degree has no entry in the addition-chain table
    #[error("unsupported S-box degree {degree}: addition-chain table covers 0..={max}")]
    UnsupportedDegree { degree: u64, max: u64 },
    /// A permutation shape parameter is outside its valid range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// The Poseidon lookup table has no base round count for this level
    #[error("no Poseidon round table for security level {0} (supported: 80, 128, 256)")]
    UnsupportedSecurityLevel(u32),
    /// The constraint count does not fit in a u64
    #[error("constraint count overflows u64")]
    ConstraintOverflow,
}

impl EstimatorError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Result type for estimator operations.
pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Largest accepted state width or branch count.
pub const MAX_WIDTH: u64 = 1 << 16;

/// Largest accepted S-box degree.
pub const MAX_SBOX_DEGREE: u64 = 1 << 32;

/// Rejects S-box degrees that do not define a non-trivial power map.
pub(crate) fn ensure_degree(name: &'static str, degree: u64) -> EstimatorResult<()> {
    if degree < 2 {
        return Err(EstimatorError::invalid(name, format!("must be at least 2, got {degree}")));
    }
    if degree > MAX_SBOX_DEGREE {
        let reason = format!("must be at most {MAX_SBOX_DEGREE}, got {degree}");
        return Err(EstimatorError::invalid(name, reason));
    }
    Ok(())
}

/// Rejects zero-sized and oversized state widths and branch counts.
pub(crate) fn ensure_width(name: &'static str, value: u64) -> EstimatorResult<()> {
    if value == 0 {
        return Err(EstimatorError::invalid(name, "must be at least 1"));
    }
    if value > MAX_WIDTH {
        let reason = format!("must be at most {MAX_WIDTH}, got {value}");
        return Err(EstimatorError::invalid(name, reason));
    }
    Ok(())
}
