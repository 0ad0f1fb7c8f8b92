//! Error types for the filter policy crate.
//!
//! Building and probing filters never fails; errors only come from the
//! surfaces around them (loading options, checking recorded policy names).

use std::fmt;
use std::io;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for filter policy operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    Io(io::Error),

    /// A serialization or deserialization error occurred.
    Serialization(String),

    /// An invalid argument was provided.
    InvalidArgument(String),

    /// The policy offered for a filter block is not the one that built it.
    PolicyMismatch {
        /// The policy name recorded alongside the filter.
        expected: String,
        /// The name of the policy that was offered.
        actual: String,
    },
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new policy mismatch error.
    pub fn policy_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::PolicyMismatch { expected: expected.into(), actual: actual.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::PolicyMismatch { expected, actual } => {
                write!(f, "Filter policy mismatch: expected {:?}, got {:?}", expected, actual)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("bad option");
        assert_eq!(err.to_string(), "Invalid argument: bad option");

        let err = Error::policy_mismatch("leveldb.BuiltinBloomFilter2", "leveldb.BuiltinBloomFilter");
        let msg = err.to_string();
        assert!(msg.contains("\"leveldb.BuiltinBloomFilter2\""));
        assert!(msg.contains("\"leveldb.BuiltinBloomFilter\""));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
