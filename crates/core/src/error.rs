//! Error types for calculator inputs.

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors raised when inputs fall outside their domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// A numeric input violates its stated range
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending input
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A milestone table is empty, unsorted or has a bad offset
    #[error("Invalid milestone table: {0}")]
    InvalidMilestoneTable(String),
}

impl CalcError {
    /// Shorthand for an [`CalcError::InvalidInput`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Ensure `value` is finite and non-negative.
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

/// Ensure `value` is finite and strictly positive.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(CalcError::invalid(field, "must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_bounds() {
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", 12.5).is_ok());
        assert!(ensure_non_negative("x", -0.01).is_err());
        assert!(ensure_non_negative("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_positive_rejects_zero() {
        let err = ensure_positive("pack_size", 0.0).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidInput {
                field: "pack_size",
                reason: "must be > 0".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Invalid input `pack_size`: must be > 0");
    }
}
