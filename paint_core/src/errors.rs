//! # Error Types
//!
//! Structured error types for paint_core. Every failure carries enough
//! context (field names, offending values, profile tags) for a caller to
//! report it per item without parsing message strings.
//!
//! ## Example
//!
//! ```rust
//! use paint_core::errors::{CalcError, CalcResult};
//!
//! fn validate_quantity(quantity: f64) -> CalcResult<()> {
//!     if quantity < 0.0 {
//!         return Err(CalcError::invalid_quantity("quantity", quantity));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_quantity(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for paint_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for surface-area calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A dimension is present but not usable (zero, negative, NaN)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// One or more dimensions required by the profile type are absent
    #[error("Missing dimension(s) for {profile_type}: {}", .fields.join(", "))]
    MissingDimension {
        profile_type: String,
        fields: Vec<String>,
    },

    /// The profile tag does not match any known profile
    #[error("Unknown profile type: '{value}'")]
    UnknownProfileType { value: String },

    /// A material category could not be mapped to a profile type
    #[error("Unknown material category: '{category}'")]
    UnknownCategory { category: String },

    /// Negative or non-finite quantity/length passed to a total-area calculation
    #[error("Invalid quantity for '{field}': {value} - must be zero or positive")]
    InvalidQuantity { field: String, value: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingDimension error
    pub fn missing_dimension<I, S>(profile_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CalcError::MissingDimension {
            profile_type: profile_type.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an UnknownProfileType error
    pub fn unknown_profile_type(value: impl Into<String>) -> Self {
        CalcError::UnknownProfileType {
            value: value.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(category: impl Into<String>) -> Self {
        CalcError::UnknownCategory {
            category: category.into(),
        }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(field: impl Into<String>, value: f64) -> Self {
        CalcError::InvalidQuantity {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidInput error for a result that overflowed `f64`
    pub fn non_finite_result(field: impl Into<String>, value: f64) -> Self {
        CalcError::invalid_input(field, value.to_string(), "Result is not a finite number")
    }

    /// Field names carried by a MissingDimension error, empty otherwise
    pub fn missing_fields(&self) -> &[String] {
        match self {
            CalcError::MissingDimension { fields, .. } => fields.as_slice(),
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingDimension { .. } => "MISSING_DIMENSION",
            CalcError::UnknownProfileType { .. } => "UNKNOWN_PROFILE_TYPE",
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Pass `value` through, or fail when it overflowed to infinity or NaN.
pub fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite_result(field, value))
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::missing_dimension("FR", ["diameter"]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"MissingDimension\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_missing_dimension_message() {
        let error = CalcError::missing_dimension("MET", ["width", "height"]);
        assert_eq!(error.to_string(), "Missing dimension(s) for MET: width, height");
        assert_eq!(error.missing_fields(), ["width".to_string(), "height".to_string()]);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_dimension("FR", ["diameter"]).error_code(), "MISSING_DIMENSION");
        assert_eq!(CalcError::unknown_profile_type("XX").error_code(), "UNKNOWN_PROFILE_TYPE");
        assert_eq!(CalcError::invalid_quantity("quantity", -1.0).error_code(), "INVALID_QUANTITY");
        assert!(CalcError::unknown_category("madeira").missing_fields().is_empty());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("perimeter_m", 0.628), Ok(0.628));
        let err = ensure_finite("perimeter_m", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(ensure_finite("total_area_m2", f64::NAN).is_err());
    }
}
