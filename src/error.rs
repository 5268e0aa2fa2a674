//! Error types for packed vector operations.
//!
//! Arithmetic never fails. The three failures below come from the
//! checked entry points: pointer loads and stores, lane subscripts and
//! constructors that need a minimum number of lanes.

use std::fmt;
use std::panic::Location;

/// Errors that can occur while building, reading or writing a packed vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// A null pointer was passed to an operation that would dereference it.
    InvalidPointer {
        /// Name of the operation that rejected the pointer.
        function: &'static str,
        /// Source location of the call.
        location: &'static Location<'static>,
    },
    /// A lane subscript was outside `[0, lanes)`.
    IndexOutOfRange {
        /// The requested lane.
        index: usize,
        /// Number of lanes in the vector.
        lanes: usize,
    },
    /// An argument was too small to initialise or receive a whole vector.
    InvalidArgument {
        /// Number of lanes the operation needs.
        expected: usize,
        /// Number of lanes that were provided.
        got: usize,
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for LaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneError::InvalidPointer { function, location } => {
                write!(f, "Invalid pointer: null pointer passed to `{function}` at {location}")
            }
            LaneError::IndexOutOfRange { index, lanes } => write!(
                f,
                "Index out of range: lane {index} requested from a vector of {lanes} lanes"
            ),
            LaneError::InvalidArgument {
                expected,
                got,
                message,
            } => write!(
                f,
                "Invalid argument: {message} (expected at least {expected} lanes, got {got})"
            ),
        }
    }
}

impl std::error::Error for LaneError {}

/// Result type alias for packed vector operations.
pub type Result<T> = std::result::Result<T, LaneError>;

/// Creates an invalid pointer error located at the caller.
#[track_caller]
pub fn invalid_pointer(function: &'static str) -> LaneError {
    LaneError::InvalidPointer {
        function,
        location: Location::caller(),
    }
}

/// Creates an index error.
pub fn index_out_of_range(index: usize, lanes: usize) -> LaneError {
    LaneError::IndexOutOfRange { index, lanes }
}

/// Creates an argument size error.
pub fn invalid_argument(expected: usize, got: usize, message: impl Into<String>) -> LaneError {
    LaneError::InvalidArgument {
        expected,
        got,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pointer_display() {
        let error = invalid_pointer("Packed::load");
        let display = format!("{}", error);
        assert!(display.contains("Invalid pointer"));
        assert!(display.contains("`Packed::load`"));
        assert!(display.contains(file!()));
    }

    #[test]
    fn test_invalid_pointer_records_caller() {
        let line = line!() + 1;
        let error = invalid_pointer("Packed::save");
        match error {
            LaneError::InvalidPointer { location, .. } => {
                assert_eq!(location.file(), file!());
                assert_eq!(location.line(), line);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_index_out_of_range_display() {
        let error = index_out_of_range(9, 8);
        let display = format!("{}", error);
        assert!(display.contains("Index out of range"));
        assert!(display.contains("lane 9"));
        assert!(display.contains("8 lanes"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = invalid_argument(8, 3, "slice too short");
        let display = format!("{}", error);
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("slice too short"));
        assert!(display.contains("expected at least 8 lanes, got 3"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = index_out_of_range(4, 4);
        let error2 = index_out_of_range(4, 4);
        let error3 = index_out_of_range(5, 4);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = invalid_argument(4, 0, "empty");

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
