//! # Error Types
//!
//! Structured error types for cable_core. Every failure carries enough
//! context (the lookup keys, or the formula and its offending input) to
//! diagnose it without re-running the calculation.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_m",
//!             length_m.to_string(),
//!             "Cable length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cable_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for lookups and calculations.
///
/// All calculations are deterministic, so no variant is retriable: callers
/// fix the inputs (or the reference data) and call again.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A table query matched zero rows, or the matched row has no value in
    /// the target column
    #[error("Lookup not found in table {table}: [{predicates}] -> '{target}'")]
    LookupNotFound {
        table: String,
        predicates: String,
        target: String,
    },

    /// A table query matched more than one row
    #[error("Ambiguous lookup in table {table}: [{predicates}] matched {matches} rows")]
    LookupAmbiguous {
        table: String,
        predicates: String,
        matches: usize,
    },

    /// Arithmetic failure inside a formula (zero denominator, log of a
    /// non-positive ratio, ...)
    #[error("Domain error in {formula}: {reason}")]
    DomainError { formula: String, reason: String },

    /// An input value is invalid (out of range, not finite, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material name does not parse to a known material
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Reference data could not be loaded
    #[error("Table load error from {source_name}: {reason}")]
    TableLoad { source_name: String, reason: String },

    /// A table cell holds a value of the wrong kind
    #[error("Table format error in {table}, column '{column}': {reason}")]
    TableFormat {
        table: String,
        column: String,
        reason: String,
    },
}

impl CalcError {
    /// Create a LookupNotFound error
    pub fn lookup_not_found(
        table: impl Into<String>,
        predicates: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        CalcError::LookupNotFound {
            table: table.into(),
            predicates: predicates.into(),
            target: target.into(),
        }
    }

    /// Create a LookupAmbiguous error
    pub fn lookup_ambiguous(table: impl Into<String>, predicates: impl Into<String>, matches: usize) -> Self {
        CalcError::LookupAmbiguous {
            table: table.into(),
            predicates: predicates.into(),
            matches,
        }
    }

    /// Create a DomainError
    pub fn domain(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a TableLoad error
    pub fn table_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::TableLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a TableFormat error
    pub fn table_format(table: impl Into<String>, column: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::TableFormat {
            table: table.into(),
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Always false: lookups and formulas are pure.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Check if this error came from a reference table query
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            CalcError::LookupNotFound { .. } | CalcError::LookupAmbiguous { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::LookupNotFound { .. } => "LOOKUP_NOT_FOUND",
            CalcError::LookupAmbiguous { .. } => "LOOKUP_AMBIGUOUS",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::TableLoad { .. } => "TABLE_LOAD",
            CalcError::TableFormat { .. } => "TABLE_FORMAT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::lookup_not_found("4.6 insulation", "material = Rubber", "permittivity");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"LookupNotFound\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::domain("capacitance", "ln(1) = 0").error_code(), "DOMAIN_ERROR");
        assert_eq!(CalcError::lookup_ambiguous("4.8", "", 2).error_code(), "LOOKUP_AMBIGUOUS");
        assert_eq!(CalcError::material_not_found("PVC").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_lookup_errors_not_recoverable() {
        let err = CalcError::lookup_not_found("4.21", "insulation = XLPE", "999");
        assert!(err.is_lookup_error());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("999"));
    }
}
