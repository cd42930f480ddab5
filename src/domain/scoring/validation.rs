//! Feature record validation utilities

use thiserror::Error;

use crate::domain::DomainError;

/// Upper bound for decimal feature fields such as acreage and bathrooms
pub const MAX_DECIMAL_FEATURE: f64 = 1_000_000.0;

/// Feature record validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureValidationError {
    /// Numeric field is NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// Numeric field is below zero
    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Numeric field exceeds the supported range
    #[error("{field} cannot exceed {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },

    /// Bathroom count is not a multiple of one half
    #[error("bathrooms must be given in half steps, got {value}")]
    NotHalfStep { value: f64 },

    /// A value required by another field is absent
    #[error("{field} is required when {required_by} is set")]
    MissingValue {
        field: &'static str,
        required_by: &'static str,
    },

    /// Enumeration value outside its declared members
    #[error("unknown {field} value '{value}', expected one of: {expected}")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Input could not be decoded into a feature record at all
    #[error("malformed feature record: {0}")]
    Malformed(String),
}

impl From<FeatureValidationError> for DomainError {
    fn from(error: FeatureValidationError) -> Self {
        DomainError::validation(error.to_string())
    }
}

/// Validate a non-negative finite decimal field no larger than [`MAX_DECIMAL_FEATURE`]
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), FeatureValidationError> {
    if !value.is_finite() {
        return Err(FeatureValidationError::NotFinite { field, value });
    }

    if value < 0.0 {
        return Err(FeatureValidationError::Negative { field, value });
    }

    if value > MAX_DECIMAL_FEATURE {
        return Err(FeatureValidationError::TooLarge {
            field,
            value,
            max: MAX_DECIMAL_FEATURE,
        });
    }

    Ok(())
}

/// Validate a bathroom count (non-negative, half steps)
pub fn validate_bathrooms(value: f64) -> Result<(), FeatureValidationError> {
    validate_non_negative("bathrooms", value)?;

    if (value * 2.0).fract() != 0.0 {
        return Err(FeatureValidationError::NotHalfStep { value });
    }

    Ok(())
}
