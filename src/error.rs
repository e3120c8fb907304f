//! Error types for the payroll record keeper.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a payroll operation can report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the payroll record keeper.
///
/// Every fallible operation returns this type. None of them panic, so a caller
/// can always turn a failure into a message for the user.
///
/// # Example
///
/// ```
/// use payroll_records::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound {
///     id: "E404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee ID not found: E404");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// No employee with the given id exists in the store.
    #[error("Employee ID not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// An employee with the given id is already in the store.
    #[error("Employee ID already exists: {id}")]
    DuplicateId {
        /// The id that collided.
        id: String,
    },

    /// A persisted record could not be decoded.
    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord {
        /// One-based line number in the records file.
        line: usize,
        /// A description of what was wrong with the line.
        message: String,
    },

    /// A caller-supplied value was rejected before touching the store.
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// Reading or writing the records file failed.
    #[error("Storage error at '{}': {source}", path.display())]
    Storage {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the calculator cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for building an [`PayrollError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error is the not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EmployeeNotFound { .. })
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = PayrollError::EmployeeNotFound {
            id: "E9".to_string(),
        };
        assert_eq!(error.to_string(), "Employee ID not found: E9");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_duplicate_id_displays_id() {
        let error = PayrollError::DuplicateId {
            id: "E1".to_string(),
        };
        assert_eq!(error.to_string(), "Employee ID already exists: E1");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_malformed_record_displays_line_and_message() {
        let error = PayrollError::MalformedRecord {
            line: 3,
            message: "expected 6 fields, found 4".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed record on line 3: expected 6 fields, found 4"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = PayrollError::invalid_input("annual_salary", "not a number");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'annual_salary': not a number"
        );
    }

    #[test]
    fn test_storage_error_displays_path_and_source() {
        let error = PayrollError::Storage {
            path: PathBuf::from("/data/employees.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            error.to_string(),
            "Storage error at '/data/employees.txt': denied"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/payroll.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/payroll.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_storage_error_exposes_source() {
        use std::error::Error as _;

        let error = PayrollError::Storage {
            path: PathBuf::from("x"),
            source: io::Error::other("disk full"),
        };
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::EmployeeNotFound {
                id: "E1".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().unwrap_err().is_not_found());
    }
}
