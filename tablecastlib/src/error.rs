//! Error types for tablecastlib

use thiserror::Error;

/// Errors that can occur while building, rendering or comparing tables
#[derive(Error, Debug)]
pub enum TableError {
    /// A value of a type the table layer does not know how to render.
    ///
    /// Raised when the value is first coerced, which is when the `Cell`,
    /// `Row` or content holding it is built. It points at a defect in the
    /// caller, so nothing falls back to a string conversion.
    #[error("cannot turn a value of type `{type_name}` into cell content")]
    UnsupportedValueType { type_name: String },

    /// Expected and actual table structures differ (comparison helpers only)
    #[error("{path}: {detail}")]
    StructuralMismatch { path: String, detail: String },

    /// Render options that cannot be used (bad timezone or strftime pattern)
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    /// The CSV sink rejected a record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    /// Build an `UnsupportedValueType` error for the given type name
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        TableError::UnsupportedValueType {
            type_name: type_name.into(),
        }
    }

    /// Build a `StructuralMismatch` error at `path`
    pub fn mismatch(path: impl Into<String>, detail: impl Into<String>) -> Self {
        TableError::StructuralMismatch {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_names_type() {
        let err = TableError::unsupported("std::fs::File");
        assert_eq!(
            err.to_string(),
            "cannot turn a value of type `std::fs::File` into cell content"
        );
    }

    #[test]
    fn test_mismatch_message_has_path() {
        let err = TableError::mismatch("cells[2].classes", "expected [\"a\"] but found []");
        assert_eq!(
            err.to_string(),
            "cells[2].classes: expected [\"a\"] but found []"
        );
    }
}
